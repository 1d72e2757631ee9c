//! HTML link extraction and scan-text assembly
//!
//! The text handed to the pattern matcher for one page is:
//! - every resolvable `<a href>` target, made absolute and defragmented,
//!   one per line
//! - optionally, the raw page markup after a newline

use scraper::{Html, Selector};
use url::Url;

/// Extracts absolute, fragment-free link targets from anchor elements
///
/// Links are returned in document order. Hrefs that cannot be resolved
/// against `base_url` are dropped.
///
/// # Example
///
/// ```
/// use sitemap_sweep::crawler::extract_hrefs;
///
/// let html = r#"<a href="/products/widget#specs">Widget</a>"#;
/// let links = extract_hrefs("https://example.com/catalog", html);
/// assert_eq!(links, vec!["https://example.com/products/widget"]);
/// ```
pub fn extract_hrefs(base_url: &str, html: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, &base))
        .collect()
}

/// Resolves one href to an absolute URL without its fragment
fn resolve_link(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let mut absolute = base.join(href).ok()?;
    absolute.set_fragment(None);
    Some(absolute.to_string())
}

/// Builds the text scanned for patterns on one page
///
/// With `scan_body` off only the link list is scanned, which avoids matches
/// inside scripts and comments but misses URLs that are not anchor targets.
pub fn build_scan_text(page_url: &str, html: &str, scan_body: bool) -> String {
    let mut text = extract_hrefs(page_url, html).join("\n");
    if scan_body {
        text.push('\n');
        text.push_str(html);
    }
    text
}
