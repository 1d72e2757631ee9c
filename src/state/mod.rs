//! Match state accumulated during a scan
//!
//! This module contains the capped pattern-to-pages table written by scan
//! tasks and the per-input results folded from it.

mod crawl_result;
mod match_set;

pub use crawl_result::{fold_results, InputResult};
pub use match_set::MatchSet;
