//! Robots.txt handling module
//!
//! This module provides functionality for fetching and parsing robots.txt
//! files, and a per-domain registry consulted before every page fetch.

mod parser;

pub use parser::{sitemap_directives, ParsedRobots};

use crate::config::Config;
use crate::crawler::{fetch_url, FetchResult};
use crate::url::find_domain;
use futures::future::join_all;
use reqwest::Client;
use std::collections::HashMap;

/// Builds the robots.txt URL for a scheme and domain
pub fn robots_url(scheme: &str, domain: &str) -> String {
    format!("{}://{}/robots.txt", scheme, domain)
}

/// Fetches and parses robots.txt from `url`
///
/// Any failure (network error, non-200 status) yields a permissive
/// ruleset; a missing robots.txt never blocks a crawl.
///
/// # Arguments
///
/// * `client` - HTTP client to use
/// * `url` - Full robots.txt URL, see [`robots_url`]
///
/// # Returns
///
/// The parsed rules, or [`ParsedRobots::allow_all`] on failure
pub async fn fetch_robots(client: &Client, url: &str) -> ParsedRobots {
    match fetch_url(client, url).await {
        FetchResult::Success { body, .. } => {
            ParsedRobots::from_content(&crate::crawler::decode_text(&body))
        }
        other => {
            tracing::debug!(
                "No robots.txt at {} ({}), allowing all",
                url,
                other.failure_reason().unwrap_or_default()
            );
            ParsedRobots::allow_all()
        }
    }
}

/// Robots rulesets by configured domain
///
/// Populated once before page scanning starts and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RobotsRegistry {
    domains: Vec<String>,
    rules: HashMap<String, ParsedRobots>,
    product_token: String,
}

impl RobotsRegistry {
    /// Loads robots.txt for every configured domain using the first scheme
    ///
    /// Domains are fetched concurrently.
    pub async fn load(client: &Client, config: &Config) -> Self {
        let scheme = config
            .scanner
            .schemes
            .first()
            .map(String::as_str)
            .unwrap_or("https");

        let fetches = config.domains.iter().map(|domain| async move {
            let robots = fetch_robots(client, &robots_url(scheme, domain)).await;
            tracing::debug!(
                "Loaded robots.txt for {} (allow all: {})",
                domain,
                robots.is_allow_all()
            );
            (domain.clone(), robots)
        });
        let rules: HashMap<String, ParsedRobots> = join_all(fetches).await.into_iter().collect();

        Self::from_rules(config, rules)
    }

    /// Builds a registry from already-parsed rules
    pub fn from_rules(config: &Config, rules: HashMap<String, ParsedRobots>) -> Self {
        Self {
            domains: config.domains.clone(),
            rules,
            product_token: config.user_agent.crawler_name.clone(),
        }
    }

    /// Checks whether robots.txt permits fetching `url`
    ///
    /// URLs outside every configured domain, or in a domain without a loaded
    /// ruleset, are allowed here; scope filtering happens separately.
    pub fn is_allowed(&self, url: &str) -> bool {
        find_domain(url, &self.domains)
            .and_then(|domain| self.rules.get(domain))
            .map(|robots| robots.is_allowed(url, &self.product_token))
            .unwrap_or(true)
    }
}
