//! Bounded, polite page fetching
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore
//! - A fixed politeness delay charged inside each concurrency slot
//! - Collapsing every fetch failure into "no page"

use crate::crawler::{fetch_url, FetchedPage, ShutdownSignal};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Scheduler gates page fetches behind a fixed pool of permits
///
/// Cloning is cheap and every clone shares the same permit pool, so each
/// spawned page task can own one.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    global_semaphore: Arc<Semaphore>,

    /// Delay applied before each request, inside the permit
    politeness_delay: Duration,

    client: Client,

    shutdown: ShutdownSignal,
}

impl Scheduler {
    /// Creates a scheduler allowing `concurrency` requests at once
    pub fn new(client: Client, concurrency: usize, politeness_delay: Duration) -> Self {
        Self {
            global_semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            politeness_delay,
            client,
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Stops starting new requests once `shutdown` is triggered
    pub fn with_shutdown(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Number of permits currently free
    pub fn available_permits(&self) -> usize {
        self.global_semaphore.available_permits()
    }

    /// Fetches a page under the concurrency bound
    ///
    /// The permit is held across the delay and the request, so the effective
    /// request rate is roughly `concurrency / delay`. Nothing is requested
    /// once shutdown has been triggered.
    ///
    /// # Arguments
    ///
    /// * `url` - Page URL to fetch
    ///
    /// # Returns
    ///
    /// The decoded page, or `None` on any failure, an empty body, or after
    /// shutdown. Failure reasons are logged at debug level.
    pub async fn fetch_page(&self, url: &str) -> Option<FetchedPage> {
        let _permit = self.global_semaphore.acquire().await.ok()?;
        if self.shutdown.is_triggered() {
            return None;
        }

        if !self.politeness_delay.is_zero() {
            tokio::time::sleep(self.politeness_delay).await;
        }

        let result = fetch_url(&self.client, url).await;
        if let Some(reason) = result.failure_reason() {
            tracing::debug!("Fetch failed for {}: {}", url, reason);
        }
        result.into_page()
    }
}
