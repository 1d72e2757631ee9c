//! Sitemap discovery and traversal
//!
//! Phase one of a sweep: find candidate sitemap URLs for each domain, then
//! walk the sitemap tree to materialize the set of page URLs to scan.

mod discovery;
mod parser;
mod traverser;

pub use discovery::{default_sitemap_url, discover_all, discover_sitemap_urls};
pub use parser::{parse_sitemap, SitemapDocument};
pub use traverser::{traverse, TraversalLimits, TraversalOutcome};

use crate::crawler::{decode_text, fetch_url, FetchResult};
use flate2::read::GzDecoder;
use reqwest::Client;
use std::io::Read;
use thiserror::Error;

/// Leading bytes of every gzip stream
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Why a sitemap document contributed nothing
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("document is not markup")]
    NotMarkup,

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("gzip decompression failed: {0}")]
    Decompress(String),
}

/// Fetches, decompresses, decodes and parses one sitemap document
///
/// # Arguments
///
/// * `client` - HTTP client to use
/// * `url` - Sitemap URL; also the base for relative `<loc>` values
///
/// # Returns
///
/// The parsed document, or the [`SitemapError`] explaining why it
/// contributes nothing
pub async fn load_sitemap(client: &Client, url: &str) -> Result<SitemapDocument, SitemapError> {
    let (content_type, body) = match fetch_url(client, url).await {
        FetchResult::Success {
            content_type, body, ..
        } if !body.is_empty() => (content_type, body),
        FetchResult::Success { .. } => return Err(SitemapError::Fetch("empty body".to_string())),
        other => {
            return Err(SitemapError::Fetch(
                other.failure_reason().unwrap_or_default(),
            ))
        }
    };

    let body = if looks_gzipped(url, &content_type) {
        maybe_decompress(body)?
    } else {
        body
    };

    parse_sitemap(url, &decode_text(&body))
}

fn looks_gzipped(url: &str, content_type: &str) -> bool {
    url.to_lowercase().ends_with(".gz") || content_type.contains("gzip")
}

/// Inflates a gzip body
///
/// Servers often label plain XML as gzip, or the HTTP layer has already
/// decoded it; bodies without the gzip magic bytes are returned unchanged.
pub fn maybe_decompress(body: Vec<u8>) -> Result<Vec<u8>, SitemapError> {
    if !body.starts_with(&GZIP_MAGIC) {
        return Ok(body);
    }

    let mut decoder = GzDecoder::new(body.as_slice());
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| SitemapError::Decompress(e.to_string()))?;
    Ok(out)
}
