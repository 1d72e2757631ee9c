//! Terminal progress bars for the two sweep phases

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Spinner shown while sitemaps are being walked
pub fn traversal_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Walking sitemaps...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    spinner
}

/// Bar counting scanned pages out of `total`
pub fn scan_bar(total: u64, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden());
    }

    let bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{bar:40.cyan/blue}] {pos}/{len} pages ({per_sec}, eta {eta}) {msg}")
    {
        bar.set_style(style.progress_chars("=>-"));
    }
    bar
}
