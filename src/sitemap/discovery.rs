//! Candidate sitemap discovery from robots.txt

use crate::crawler::{decode_text, fetch_url, FetchResult};
use crate::robots::{robots_url, sitemap_directives};
use futures::future::join_all;
use reqwest::Client;
use std::collections::BTreeSet;

/// The well-known sitemap location for a scheme and domain
pub fn default_sitemap_url(scheme: &str, domain: &str) -> String {
    format!("{}://{}/sitemap.xml", scheme, domain)
}

/// Collects candidate sitemap URLs for one domain
///
/// For every scheme, each `Sitemap:` line of that scheme's robots.txt is a
/// candidate, and `/sitemap.xml` is always added. An unreachable robots.txt
/// only removes its own directives from the result.
///
/// # Arguments
///
/// * `client` - HTTP client to use
/// * `domain` - Domain (host or host:port) to discover for
/// * `schemes` - Schemes to try, in preference order
///
/// # Returns
///
/// The set of candidate sitemap URLs, never empty when `schemes` is not
pub async fn discover_sitemap_urls(
    client: &Client,
    domain: &str,
    schemes: &[String],
) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();

    for scheme in schemes {
        let url = robots_url(scheme, domain);
        match fetch_url(client, &url).await {
            FetchResult::Success { body, .. } => {
                let directives = sitemap_directives(&decode_text(&body));
                tracing::debug!("{} lists {} sitemap(s)", url, directives.len());
                candidates.extend(directives);
            }
            other => {
                tracing::debug!(
                    "Skipping robots.txt at {}: {}",
                    url,
                    other.failure_reason().unwrap_or_default()
                );
            }
        }

        candidates.insert(default_sitemap_url(scheme, domain));
    }

    candidates
}

/// Runs discovery for every domain concurrently and unions the candidates
pub async fn discover_all(
    client: &Client,
    domains: &[String],
    schemes: &[String],
) -> BTreeSet<String> {
    let per_domain = join_all(domains.iter().map(|domain| async move {
        let found = discover_sitemap_urls(client, domain, schemes).await;
        tracing::info!("{}: {} candidate sitemap(s)", domain, found.len());
        found
    }))
    .await;

    per_domain.into_iter().flatten().collect()
}
