//! Crawler module for page fetching and sweep coordination
//!
//! This module contains the core sweep logic, including:
//! - HTTP fetching with failure classification
//! - HTML link extraction and scan-text assembly
//! - Concurrency-bounded, polite page scheduling
//! - Overall two-phase coordination

mod coordinator;
mod fetcher;
mod parser;
mod progress;
mod scheduler;
mod shutdown;

pub use coordinator::{run_crawl, run_single_page, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, decode_text, fetch_url, FetchResult, FetchedPage};
pub use parser::{build_scan_text, extract_hrefs};
pub use scheduler::Scheduler;
pub use shutdown::ShutdownSignal;
