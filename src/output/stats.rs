//! Run summary printed at the end of a sweep

use chrono::{DateTime, Utc};

/// Counters describing one sweep
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Configured domains
    pub domains: Vec<String>,

    /// Sitemap URLs found by discovery
    pub sitemap_candidates: usize,

    /// Sitemap documents taken off the worklist
    pub sitemaps_visited: usize,

    /// Page URLs produced by traversal
    pub pages_discovered: usize,

    /// Pages that passed scope, binary and robots filtering
    pub pages_allowed: usize,

    /// Pages whose fetch returned content
    pub pages_with_content: usize,

    /// Distinct patterns that matched at least one page
    pub patterns_matched: usize,
    pub pattern_count: usize,
    pub matcher: String,

    pub inputs_total: usize,
    pub inputs_found: usize,
}

impl ScanSummary {
    /// Wall-clock duration in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Prints a summary to stdout in a formatted manner
pub fn print_summary(summary: &ScanSummary) {
    println!("=== Sweep Summary ===\n");

    println!("Run:");
    println!("  Started:  {}", summary.started_at.to_rfc3339());
    println!("  Finished: {}", summary.finished_at.to_rfc3339());
    println!("  Duration: {} seconds", summary.duration_seconds());
    println!("  Domains:  {}", summary.domains.join(", "));
    println!();

    println!("Discovery:");
    println!("  Sitemap candidates: {}", summary.sitemap_candidates);
    println!("  Sitemaps visited: {}", summary.sitemaps_visited);
    println!("  Pages discovered: {}", summary.pages_discovered);
    println!("  Pages allowed:    {}", summary.pages_allowed);
    println!("  Pages with content: {}", summary.pages_with_content);
    println!();

    println!("Matching ({}):", summary.matcher);
    println!(
        "  Patterns matched: {} / {}",
        summary.patterns_matched, summary.pattern_count
    );

    let percentage = if summary.inputs_total > 0 {
        (summary.inputs_found as f64 / summary.inputs_total as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "  Inputs found: {} / {} ({:.1}%)",
        summary.inputs_found, summary.inputs_total, percentage
    );
}
