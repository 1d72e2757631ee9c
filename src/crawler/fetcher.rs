//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the sweep, including:
//! - Building the HTTP client with the identifying user agent
//! - GET requests with redirect following and a total timeout
//! - Error classification into a [`FetchResult`]
//! - Permissive text decoding of response bodies

use crate::config::Config;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Maximum number of redirects followed per request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
///
/// Every outcome is a value: callers decide whether a failure means
/// "no content" for that URL.
#[derive(Debug)]
pub enum FetchResult {
    /// Received an HTTP 200 response
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Content-Type header value (lowercase, may be empty)
        content_type: String,
        /// Raw response body
        body: Vec<u8>,
    },

    /// Any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Decoded text of a page, with the URL it was finally served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL after redirects, used as the base for relative links
    pub final_url: String,
    pub html: String,
}

impl FetchResult {
    /// Converts a successful, non-empty response into a [`FetchedPage`]
    ///
    /// Failures and empty bodies yield `None`.
    pub fn into_page(self) -> Option<FetchedPage> {
        self.into_page_or_reason().ok()
    }

    /// Like [`into_page`](Self::into_page), but keeps why there is no page
    pub fn into_page_or_reason(self) -> Result<FetchedPage, String> {
        match self {
            FetchResult::Success { body, .. } if body.is_empty() => {
                Err("empty body".to_string())
            }
            FetchResult::Success {
                final_url, body, ..
            } => Ok(FetchedPage {
                final_url,
                html: decode_text(&body),
            }),
            FetchResult::HttpError { status_code } => Err(format!("HTTP {}", status_code)),
            FetchResult::NetworkError { error } => Err(error),
        }
    }

    /// Short description of a failed fetch, for logging
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            FetchResult::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client sends the configured user agent on every request, follows
/// redirects and applies the total per-request timeout.
///
/// # Arguments
///
/// * `config` - Sweep configuration (user agent and request timeout)
///
/// # Returns
///
/// A configured `reqwest::Client`, or the builder error
///
/// # Example
///
/// ```no_run
/// use sitemap_sweep::config::Config;
/// use sitemap_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.scanner.request_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Only HTTP 200 counts as success. Timeouts, connection failures and body
/// read errors become [`FetchResult::NetworkError`].
///
/// # Arguments
///
/// * `client` - HTTP client to use
/// * `url` - URL to fetch
///
/// # Returns
///
/// The classified outcome. This function never fails; errors are values.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    match response.bytes().await {
        Ok(bytes) => FetchResult::Success {
            final_url,
            content_type,
            body: bytes.to_vec(),
        },
        Err(e) => classify_error(e),
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}

/// Decodes a response body to text without ever failing
///
/// UTF-8 is preferred; anything else is decoded byte-per-char as Latin-1.
pub fn decode_text(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(_) => raw.iter().map(|&b| b as char).collect(),
    }
}
