//! Crawler coordinator - main sweep orchestration logic
//!
//! A sweep runs two strictly sequential phases:
//! - Discovery: collect candidate sitemaps and walk them into a page set
//! - Scanning: fetch every allowed page under the concurrency bound and
//!   record which patterns occur on it
//!
//! Matches are then folded back onto the original inputs.

use crate::config::Config;
use crate::crawler::parser::build_scan_text;
use crate::crawler::progress::{scan_bar, traversal_spinner};
use crate::crawler::scheduler::Scheduler;
use crate::crawler::{build_http_client, fetch_url, ShutdownSignal};
use crate::matcher::{build_matcher, PatternMatcher};
use crate::output::{save_traversal_diagnostics, write_results, write_test_results, ScanSummary};
use crate::robots::RobotsRegistry;
use crate::sitemap::{discover_all, traverse, TraversalLimits, TraversalOutcome};
use crate::state::{fold_results, InputResult, MatchSet};
use crate::url::{in_scope, is_binary_url, VariantMap};
use crate::SweepError;
use chrono::Utc;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Everything a finished crawl produced
#[derive(Debug)]
pub struct CrawlReport {
    /// One entry per input line, in input order
    pub results: Vec<InputResult>,

    /// Sitemap traversal output
    pub traversal: TraversalOutcome,

    pub summary: ScanSummary,
}

/// Main sweep coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    shutdown: ShutdownSignal,
}

impl Coordinator {
    /// Creates a coordinator with an HTTP client built from `config`
    pub fn new(config: Config, shutdown: ShutdownSignal) -> Result<Self, SweepError> {
        let client = build_http_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            shutdown,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs discovery and traversal for every configured domain
    ///
    /// Diagnostic URL dumps are written to the configured directory once the
    /// page set is known.
    pub async fn discover_pages(&self) -> TraversalOutcome {
        let spinner = traversal_spinner(self.config.scanner.show_progress);

        let candidates = discover_all(
            &self.client,
            &self.config.domains,
            &self.config.scanner.schemes,
        )
        .await;
        tracing::info!("{} initial sitemap candidate(s)", candidates.len());

        let limits = TraversalLimits {
            max_pages: self.config.scanner.max_pages,
            sitemap_cap: self.config.scanner.sitemap_cap,
        };
        let outcome = traverse(
            &self.client,
            candidates,
            &self.config.domains,
            limits,
            &self.shutdown,
            &spinner,
        )
        .await;
        spinner.finish_and_clear();

        save_traversal_diagnostics(Path::new(&self.config.output.diagnostics_dir), &outcome);
        outcome
    }

    /// Runs a full sweep over `inputs`
    ///
    /// Returns [`SweepError::Interrupted`] if a shutdown was requested before
    /// every page was scanned; partial matches are discarded in that case.
    pub async fn run(&self, inputs: &[String]) -> Result<CrawlReport, SweepError> {
        let started_at = Utc::now();
        tracing::info!(
            "Starting sweep of {} domain(s) for {} input(s)",
            self.config.domains.len(),
            inputs.len()
        );

        let variants = VariantMap::build(inputs);
        let patterns = variants.patterns();
        let matcher = build_matcher(&patterns, self.config.scanner.matcher);
        tracing::info!(
            "Built {} matcher over {} pattern(s)",
            matcher.kind(),
            matcher.pattern_count()
        );

        // Phase 1
        let traversal = self.discover_pages().await;
        if traversal.interrupted || self.shutdown.is_triggered() {
            return Err(SweepError::Interrupted);
        }

        // Phase 2
        let robots = RobotsRegistry::load(&self.client, &self.config).await;
        let allowed: Vec<String> = traversal
            .pages
            .iter()
            .filter(|page| self.is_allowed(page, &robots))
            .take(self.config.scanner.max_pages)
            .cloned()
            .collect();
        tracing::info!(
            "{} of {} discovered page(s) allowed for scanning",
            allowed.len(),
            traversal.pages.len()
        );

        let matches = Arc::new(MatchSet::new(self.config.scanner.max_match_pages_per_query));
        let pages_with_content = self.scan_pages(&allowed, &matcher, &matches).await;

        if self.shutdown.is_triggered() {
            return Err(SweepError::Interrupted);
        }

        let results = fold_results(&variants, &matches);
        let summary = ScanSummary {
            started_at,
            finished_at: Utc::now(),
            domains: self.config.domains.clone(),
            sitemap_candidates: traversal.initial.len(),
            sitemaps_visited: traversal.visited.len(),
            pages_discovered: traversal.pages.len(),
            pages_allowed: allowed.len(),
            pages_with_content,
            patterns_matched: matches.matched_pattern_count(),
            pattern_count: matcher.pattern_count(),
            matcher: matcher.kind().to_string(),
            inputs_total: results.len(),
            inputs_found: results.iter().filter(|r| r.found()).count(),
        };

        Ok(CrawlReport {
            results,
            traversal,
            summary,
        })
    }

    fn is_allowed(&self, url: &str, robots: &RobotsRegistry) -> bool {
        in_scope(url, &self.config.domains) && !is_binary_url(url) && robots.is_allowed(url)
    }

    /// Fetches and scans every page, returning how many had content
    ///
    /// All tasks are spawned up front; the scheduler's permits bound how many
    /// are on the network at once. After a shutdown request, tasks that have
    /// not started fetching return without doing so.
    async fn scan_pages(
        &self,
        pages: &[String],
        matcher: &Arc<dyn PatternMatcher>,
        matches: &Arc<MatchSet>,
    ) -> usize {
        let scheduler = Scheduler::new(
            self.client.clone(),
            self.config.scanner.concurrency,
            Duration::from_millis(self.config.scanner.politeness_delay_ms),
        )
        .with_shutdown(self.shutdown.clone());
        let scan_body = self.config.scanner.scan_body;
        let bar = scan_bar(pages.len() as u64, self.config.scanner.show_progress);

        let mut tasks = JoinSet::new();
        for page in pages {
            let page = page.clone();
            let scheduler = scheduler.clone();
            let matcher = Arc::clone(matcher);
            let matches = Arc::clone(matches);

            tasks.spawn(async move {
                let Some(fetched) = scheduler.fetch_page(&page).await else {
                    return false;
                };

                // Relative links resolve against where the page was served from
                let text = build_scan_text(&fetched.final_url, &fetched.html, scan_body);
                let found = matcher.find(&text);
                if !found.is_empty() {
                    let recorded = matches.record_all(found.iter().copied(), &page);
                    tracing::debug!(
                        "{}: {} pattern(s) matched, {} recorded",
                        page,
                        found.len(),
                        recorded
                    );
                }
                true
            });
        }

        let mut pages_with_content = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(true) => pages_with_content += 1,
                Ok(false) => {}
                Err(e) => tracing::error!("Page scan task failed: {}", e),
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        pages_with_content
    }

    /// Scans exactly one page for every input
    ///
    /// Scope and robots filtering do not apply. Returns `None` when the page
    /// could not be fetched.
    pub async fn scan_single_page(
        &self,
        test_url: &str,
        inputs: &[String],
    ) -> Option<Vec<InputResult>> {
        let variants = VariantMap::build(inputs);
        let matcher = build_matcher(&variants.patterns(), self.config.scanner.matcher);

        let fetched = match fetch_url(&self.client, test_url).await.into_page_or_reason() {
            Ok(fetched) => fetched,
            Err(reason) => {
                tracing::warn!(
                    "Could not fetch test page {} ({}), nothing written",
                    test_url,
                    reason
                );
                return None;
            }
        };

        let text = build_scan_text(
            &fetched.final_url,
            &fetched.html,
            self.config.scanner.scan_body,
        );
        let matches = MatchSet::new(1);
        matches.record_all(matcher.find(&text), test_url);

        let results = fold_results(&variants, &matches);
        let found: Vec<&str> = results
            .iter()
            .filter(|r| r.found())
            .map(|r| r.query.as_str())
            .collect();
        tracing::info!(
            "{} of {} input(s) found on {}",
            found.len(),
            results.len(),
            test_url
        );
        for query in found.iter().take(10) {
            tracing::info!("  matched: {}", query);
        }

        Some(results)
    }
}

/// Runs a complete sweep and writes the results CSV
///
/// This is the main entry point for crawl mode. It will:
/// 1. Discover sitemaps and collect pages
/// 2. Scan every allowed page for input variants
/// 3. Write one CSV row per input to the configured results path
pub async fn run_crawl(
    config: Config,
    inputs: &[String],
    shutdown: ShutdownSignal,
) -> Result<CrawlReport, SweepError> {
    let coordinator = Coordinator::new(config, shutdown)?;
    let report = coordinator.run(inputs).await?;

    let config = coordinator.config();
    write_results(
        Path::new(&config.output.results_path),
        &report.results,
        config.scanner.max_match_pages_per_query,
    )?;

    Ok(report)
}

/// Scans a single page and writes the test results CSV
///
/// Nothing is written when the page cannot be fetched.
pub async fn run_single_page(
    config: Config,
    test_url: &str,
    inputs: &[String],
) -> Result<Option<Vec<InputResult>>, SweepError> {
    let coordinator = Coordinator::new(config, ShutdownSignal::new())?;
    let Some(results) = coordinator.scan_single_page(test_url, inputs).await else {
        return Ok(None);
    };

    write_test_results(
        Path::new(&coordinator.config().output.test_results_path),
        &results,
    )?;
    Ok(Some(results))
}
