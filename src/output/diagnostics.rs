//! Plain-text URL dumps written after sitemap traversal

use crate::sitemap::TraversalOutcome;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const INITIAL_SITEMAPS_FILE: &str = "discovered_sitemaps_initial.txt";
pub const ALL_SITEMAPS_FILE: &str = "discovered_sitemaps_all.txt";
pub const PAGES_FILE: &str = "discovered_pages.txt";

/// Writes one URL per line in sorted order
pub fn save_url_list(path: &Path, urls: &BTreeSet<String>) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for url in urls {
        writeln!(out, "{}", url)?;
    }
    out.flush()
}

/// Dumps initial candidates, visited sitemaps and pages into `dir`
///
/// Diagnostics never fail a run; a file that cannot be written is logged
/// and skipped.
pub fn save_traversal_diagnostics(dir: &Path, outcome: &TraversalOutcome) {
    let files = [
        (INITIAL_SITEMAPS_FILE, &outcome.initial),
        (ALL_SITEMAPS_FILE, &outcome.visited),
        (PAGES_FILE, &outcome.pages),
    ];

    for (name, urls) in files {
        let path = dir.join(name);
        match save_url_list(&path, urls) {
            Ok(()) => tracing::debug!("Saved {} URL(s) to {}", urls.len(), path.display()),
            Err(e) => tracing::warn!("Could not write {}: {}", path.display(), e),
        }
    }
}
