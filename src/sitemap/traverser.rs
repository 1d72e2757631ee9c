//! Worklist traversal of sitemap trees

use crate::crawler::ShutdownSignal;
use crate::sitemap::{load_sitemap, SitemapDocument};
use crate::url::{in_scope, is_binary_url, strip_fragment};
use indicatif::ProgressBar;
use reqwest::Client;
use std::collections::BTreeSet;

/// Hard limits on one traversal
#[derive(Debug, Clone, Copy)]
pub struct TraversalLimits {
    /// Maximum distinct page URLs to collect
    pub max_pages: usize,
    /// Maximum sitemap documents to process
    pub sitemap_cap: usize,
}

/// What a traversal produced
#[derive(Debug, Default, Clone)]
pub struct TraversalOutcome {
    /// Candidate sitemap URLs the traversal started from
    pub initial: BTreeSet<String>,
    /// Every sitemap URL taken off the worklist
    pub visited: BTreeSet<String>,
    /// In-scope, non-binary, defragmented page URLs
    pub pages: BTreeSet<String>,
    pub documents_processed: usize,
    /// True when a shutdown request cut the traversal short
    pub interrupted: bool,
}

/// Walks sitemap documents starting from `initial`
///
/// Each sitemap URL is processed at most once no matter how many parents
/// reference it. The walk ends when the worklist drains, `max_pages` pages
/// have been collected, or `sitemap_cap` documents have been processed.
/// A document that fails to fetch or parse contributes nothing.
///
/// # Arguments
///
/// * `client` - HTTP client used for every sitemap request
/// * `initial` - Candidate sitemap URLs from discovery
/// * `domains` - In-scope domains; pages elsewhere are dropped
/// * `limits` - Page and document caps
/// * `shutdown` - Checked before each document
/// * `progress` - Receives a running count after each document
///
/// # Returns
///
/// Visited sitemaps and collected pages, with `interrupted` set when the
/// walk was cut short by a shutdown request
pub async fn traverse(
    client: &Client,
    initial: BTreeSet<String>,
    domains: &[String],
    limits: TraversalLimits,
    shutdown: &ShutdownSignal,
    progress: &ProgressBar,
) -> TraversalOutcome {
    let mut outcome = TraversalOutcome {
        initial: initial.clone(),
        ..TraversalOutcome::default()
    };
    let mut worklist: Vec<String> = initial.into_iter().collect();

    while outcome.pages.len() < limits.max_pages
        && outcome.documents_processed < limits.sitemap_cap
    {
        if shutdown.is_triggered() {
            tracing::warn!("Shutdown requested, stopping sitemap traversal");
            outcome.interrupted = true;
            break;
        }

        let Some(sitemap_url) = worklist.pop() else {
            break;
        };
        if !outcome.visited.insert(sitemap_url.clone()) {
            continue;
        }
        outcome.documents_processed += 1;

        match load_sitemap(client, &sitemap_url).await {
            Ok(document) => {
                tracing::debug!(
                    "Sitemap {}: {} nested, {} pages",
                    sitemap_url,
                    document.nested_sitemaps.len(),
                    document.page_urls.len()
                );
                absorb(&mut outcome, &mut worklist, document, domains, limits.max_pages);
            }
            Err(e) => tracing::debug!("Sitemap {} skipped: {}", sitemap_url, e),
        }

        progress.set_message(progress_message(&outcome));
    }

    tracing::info!(
        "Sitemap traversal done: {} document(s), {} page(s)",
        outcome.documents_processed,
        outcome.pages.len()
    );

    outcome
}

/// Queues unvisited nested sitemaps and collects filtered pages
fn absorb(
    outcome: &mut TraversalOutcome,
    worklist: &mut Vec<String>,
    document: SitemapDocument,
    domains: &[String],
    max_pages: usize,
) {
    for nested in document.nested_sitemaps {
        if !outcome.visited.contains(&nested) {
            worklist.push(nested);
        }
    }

    for page in document.page_urls {
        if outcome.pages.len() >= max_pages {
            break;
        }
        if !in_scope(&page, domains) || is_binary_url(&page) {
            continue;
        }
        outcome.pages.insert(strip_fragment(&page).to_string());
    }
}

fn progress_message(outcome: &TraversalOutcome) -> String {
    format!(
        "Sitemaps processed: {} | Pages collected: {}",
        outcome.documents_processed,
        outcome.pages.len()
    )
}
