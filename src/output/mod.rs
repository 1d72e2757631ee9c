//! Output module for sweep results and reports
//!
//! This module handles:
//! - Writing the per-input results CSV (crawl and single-page modes)
//! - Dumping discovered sitemap and page URLs for diagnosis
//! - Summarizing a run on stdout

mod csv_report;
mod diagnostics;
pub mod stats;

pub use csv_report::{results_header, write_results, write_test_results};
pub use diagnostics::{save_traversal_diagnostics, save_url_list};
pub use stats::{print_summary, ScanSummary};
