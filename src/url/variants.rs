//! Target string expansion into the textual forms a page may contain

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeSet;

/// Variants shorter than this many characters are discarded
pub const MIN_VARIANT_LEN: usize = 6;

/// Characters left untouched by the percent-encoded variant
const VARIANT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b'%');

/// Expands one target string into its set of match variants
///
/// All of the following forms are collected:
/// 1. the trimmed input
/// 2. its HTML-entity-unescaped form
/// 3. that form without its `#fragment`
/// 4. when it has a network location: the form without `scheme://`, and for
///    `www.` hosts the form without `www.` (with and without the scheme)
/// 5. the percent-encoded form of every variant above
///
/// Variants shorter than [`MIN_VARIANT_LEN`] characters are dropped.
///
/// # Examples
///
/// ```
/// use sitemap_sweep::url::normalize_variants;
///
/// let variants = normalize_variants("https://www.example.com/a/b#frag");
/// assert!(variants.contains("https://www.example.com/a/b"));
/// assert!(variants.contains("www.example.com/a/b"));
/// assert!(variants.contains("example.com/a/b"));
/// ```
pub fn normalize_variants(target: &str) -> BTreeSet<String> {
    let mut variants = BTreeSet::new();

    let trimmed = target.trim();
    if trimmed.is_empty() {
        return variants;
    }
    variants.insert(trimmed.to_string());

    let unescaped = html_escape::decode_html_entities(trimmed).into_owned();
    variants.insert(unescaped.clone());

    let defragmented = strip_fragment(&unescaped).to_string();
    variants.insert(defragmented.clone());

    let (scheme, netloc) = split_network_location(&defragmented);
    if let Some(netloc) = netloc {
        if let Some(scheme) = scheme {
            variants.insert(defragmented.replacen(&format!("{}://", scheme), "", 1));
        }
        if let Some(bare_host) = netloc.strip_prefix("www.") {
            let no_www = defragmented.replacen(netloc, bare_host, 1);
            if let Some(scheme) = scheme {
                variants.insert(no_www.replacen(&format!("{}://", scheme), "", 1));
            }
            variants.insert(no_www);
        }
    }

    let encoded: Vec<String> = variants
        .iter()
        .map(|v| utf8_percent_encode(v, VARIANT_ENCODE_SET).to_string())
        .collect();
    variants.extend(encoded);

    variants.retain(|v| v.chars().count() >= MIN_VARIANT_LEN);
    variants
}

/// Drops everything from the first `#` on
pub fn strip_fragment(s: &str) -> &str {
    match s.split_once('#') {
        Some((before, _)) => before,
        None => s,
    }
}

/// Splits the raw scheme and network location out of a URL-like string
///
/// Unlike a full URL parse this keeps the original text (case, missing
/// trailing slash) so variants can be derived by plain substitution.
fn split_network_location(s: &str) -> (Option<&str>, Option<&str>) {
    let (scheme, rest) = match s.find(':') {
        Some(idx) if is_scheme(&s[..idx]) => (Some(&s[..idx]), &s[idx + 1..]),
        _ => (None, s),
    };

    let netloc = rest
        .strip_prefix("//")
        .map(|r| {
            let end = r
                .find(|c| matches!(c, '/' | '?' | '#'))
                .unwrap_or(r.len());
            &r[..end]
        })
        .filter(|n| !n.is_empty());

    (scheme, netloc)
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Each target input paired with its variant set, in input order
///
/// Inputs may share variants; the union of all sets is the pattern set the
/// matcher is built from.
#[derive(Debug, Clone, Default)]
pub struct VariantMap {
    entries: Vec<(String, BTreeSet<String>)>,
}

impl VariantMap {
    /// Builds the map for every input line, keeping order and duplicates
    pub fn build(inputs: &[String]) -> Self {
        Self {
            entries: inputs
                .iter()
                .map(|input| (input.clone(), normalize_variants(input)))
                .collect(),
        }
    }

    /// The union of all variant sets
    pub fn patterns(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .flat_map(|(_, variants)| variants.iter().cloned())
            .collect()
    }

    /// Iterates over `(input, variants)` pairs in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(input, v)| (input.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
