//! Sitemap XML parsing
//!
//! Element names are matched by local name, so namespaced documents
//! (`<ns:urlset>`, default `xmlns`) parse the same as plain ones.

use crate::sitemap::SitemapError;
use crate::url::is_sitemap_like;
use quick_xml::events::Event;
use quick_xml::Reader;
use url::Url;

/// The useful content of one sitemap document
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SitemapDocument {
    /// Sitemap URLs to follow
    pub nested_sitemaps: Vec<String>,

    /// Page URL candidates, before scope and binary filtering
    pub page_urls: Vec<String>,
}

/// Parses a sitemap index or urlset
///
/// A `sitemapindex` root yields its `sitemap/loc` entries as nested sitemaps
/// and no pages. Any other root is treated as a urlset: `url/loc` entries are
/// pages, except those that look like sitemaps, which are followed instead.
/// Relative locations are resolved against `base_url`.
///
/// # Errors
///
/// Returns [`SitemapError::Xml`] for malformed markup, unclosed elements or
/// a document without a root element.
///
/// # Examples
///
/// ```
/// use sitemap_sweep::sitemap::parse_sitemap;
///
/// let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://x.com/page</loc></url>
///   <url><loc>https://x.com/news-sitemap.xml</loc></url>
/// </urlset>"#;
///
/// let doc = parse_sitemap("https://x.com/sitemap.xml", xml).unwrap();
/// assert_eq!(doc.page_urls, vec!["https://x.com/page"]);
/// assert_eq!(doc.nested_sitemaps, vec!["https://x.com/news-sitemap.xml"]);
/// ```
pub fn parse_sitemap(base_url: &str, xml: &str) -> Result<SitemapDocument, SitemapError> {
    if !xml.trim_start().starts_with('<') {
        return Err(SitemapError::NotMarkup);
    }

    let (root, locs) = collect_locs(xml)?;
    let base = Url::parse(base_url).ok();
    let mut document = SitemapDocument::default();

    if root.eq_ignore_ascii_case("sitemapindex") {
        document.nested_sitemaps = locs
            .into_iter()
            .filter(|(parent, _)| parent == "sitemap")
            .map(|(_, loc)| resolve(base.as_ref(), loc))
            .collect();
    } else {
        for (parent, loc) in locs {
            if parent != "url" {
                continue;
            }
            let loc = resolve(base.as_ref(), loc);
            if is_sitemap_like(&loc) {
                document.nested_sitemaps.push(loc);
            } else {
                document.page_urls.push(loc);
            }
        }
    }

    Ok(document)
}

/// Reads the root element name and every non-empty `<loc>` text with the
/// local name of its parent element
fn collect_locs(xml: &str) -> Result<(String, Vec<(String, String)>), SitemapError> {
    let mut reader = Reader::from_str(xml);

    let mut root: Option<String> = None;
    let mut stack: Vec<String> = Vec::new();
    let mut locs = Vec::new();
    let mut text = String::new();
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if root.is_none() {
                    root = Some(name.clone());
                }
                if name == "loc" {
                    in_loc = true;
                    text.clear();
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                }
            }
            Ok(Event::Text(t)) => {
                if in_loc {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| SitemapError::Xml(e.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(c)) => {
                if in_loc {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(_)) => {
                let closed = stack.pop();
                if in_loc && closed.as_deref() == Some("loc") {
                    in_loc = false;
                    let value = text.trim();
                    if !value.is_empty() {
                        let parent = stack.last().cloned().unwrap_or_default();
                        locs.push((parent, value.to_string()));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(SitemapError::Xml(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(SitemapError::Xml(format!(
            "unclosed element <{}>",
            stack.last().map(String::as_str).unwrap_or_default()
        )));
    }

    let root = root.ok_or_else(|| SitemapError::Xml("no root element".to_string()))?;
    Ok((root, locs))
}

/// Keeps absolute locations verbatim and resolves relative ones
fn resolve(base: Option<&Url>, loc: String) -> String {
    if Url::parse(&loc).is_ok() {
        return loc;
    }
    base.and_then(|b| b.join(&loc).ok())
        .map(|u| u.to_string())
        .unwrap_or(loc)
}
