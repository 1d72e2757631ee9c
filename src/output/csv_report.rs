//! Results CSV writers

use crate::state::InputResult;
use crate::Result;
use std::path::Path;

/// Header for a results file listing up to `cap` matching pages per input
pub fn results_header(cap: usize) -> Vec<String> {
    let mut header = vec![
        "queried_url".to_string(),
        "found".to_string(),
        "match_count".to_string(),
    ];
    header.extend((1..=cap).map(|i| format!("match_page_{}", i)));
    header
}

/// Writes the crawl-mode results CSV
///
/// One row per input in input order. Pages beyond `cap` are not written and
/// do not count toward `match_count`. Short rows are padded with empty cells
/// so every row has the header's width.
///
/// # Arguments
///
/// * `path` - Destination file, created or truncated
/// * `results` - Folded results, one per input line
/// * `cap` - Maximum page columns per row
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_results(path: &Path, results: &[InputResult], cap: usize) -> Result<()> {
    let header = results_header(cap);
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&header)?;

    for result in results {
        let pages: Vec<&str> = result.pages.iter().take(cap).map(String::as_str).collect();
        let mut row = vec![
            result.query.clone(),
            render_found(!pages.is_empty()).to_string(),
            pages.len().to_string(),
        ];
        row.extend(pages.iter().map(|p| p.to_string()));
        row.resize(header.len(), String::new());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    tracing::info!("Wrote {} result row(s) to {}", results.len(), path.display());
    Ok(())
}

/// Writes the single-page results CSV
///
/// Each input either matched the tested page (listed as `match_page_1`) or
/// did not.
pub fn write_test_results(path: &Path, results: &[InputResult]) -> Result<()> {
    write_results(path, results, 1)
}

fn render_found(found: bool) -> &'static str {
    if found {
        "True"
    } else {
        "False"
    }
}
