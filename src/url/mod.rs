//! URL handling module for Sitemap-Sweep
//!
//! This module provides domain scoping, binary-resource filtering, the
//! sitemap-like heuristic, and target-string variant expansion.

mod domain;
mod variants;

use ::url::Url;

// Re-export main functions
pub use domain::{extract_authority, find_domain, in_scope, matches_domain};
pub use variants::{normalize_variants, strip_fragment, VariantMap, MIN_VARIANT_LEN};

/// Path extensions that are never fetched or scanned
pub const BINARY_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".pdf", ".zip", ".rar", ".7z", ".mp4",
    ".mp3", ".mov", ".avi", ".mkv", ".woff", ".woff2", ".ttf", ".eot", ".otf", ".ico",
];

/// Returns true if the URL path ends with a known binary extension
///
/// # Examples
///
/// ```
/// use sitemap_sweep::url::is_binary_url;
///
/// assert!(is_binary_url("https://example.com/logo.PNG"));
/// assert!(!is_binary_url("https://example.com/logo.png.html"));
/// assert!(!is_binary_url("https://example.com/page?file=a.pdf"));
/// ```
pub fn is_binary_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let path = parsed.path().to_lowercase();
    BINARY_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Returns true if a URL looks like it references a sitemap document
///
/// A URL is sitemap-like when it ends in `.xml` or `.xml.gz`, contains
/// "sitemap" anywhere, or carries a query parameter whose key contains
/// "sitemap". Entries matching this inside a `urlset` are followed as nested
/// sitemaps rather than collected as pages, which also catches pages that
/// merely have "sitemap" in their address.
///
/// # Examples
///
/// ```
/// use sitemap_sweep::url::is_sitemap_like;
///
/// assert!(is_sitemap_like("https://x.com/news-sitemap.xml"));
/// assert!(is_sitemap_like("https://x.com/feed.xml.gz"));
/// assert!(is_sitemap_like("https://x.com/index.php?SiteMap=2"));
/// assert!(!is_sitemap_like("https://x.com/products/widget"));
/// ```
pub fn is_sitemap_like(url: &str) -> bool {
    let lower = url.to_lowercase();
    if lower.ends_with(".xml") || lower.ends_with(".xml.gz") {
        return true;
    }
    if lower.contains("sitemap") {
        return true;
    }

    match Url::parse(url) {
        Ok(parsed) => parsed
            .query_pairs()
            .any(|(key, _)| key.to_lowercase().contains("sitemap")),
        Err(_) => false,
    }
}
