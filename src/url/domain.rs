use url::Url;

/// Extracts the authority used for scope checks from a URL
///
/// This is the lowercase host, followed by `:port` when the URL names a
/// non-default port explicitly.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitemap_sweep::url::extract_authority;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Checks if an authority falls under a configured domain
///
/// A domain covers itself and every subdomain of it:
/// "example.com" matches "example.com", "blog.example.com" and
/// "api.v2.example.com", but not "myexample.com".
pub fn matches_domain(domain: &str, authority: &str) -> bool {
    authority == domain || authority.ends_with(&format!(".{}", domain))
}

/// Returns the first configured domain covering `url`, if any
pub fn find_domain<'a>(url: &str, domains: &'a [String]) -> Option<&'a str> {
    let parsed = Url::parse(url).ok()?;
    let authority = extract_authority(&parsed)?;
    domains
        .iter()
        .find(|d| matches_domain(d, &authority))
        .map(String::as_str)
}

/// Checks whether `url` belongs to one of the configured domains
pub fn in_scope(url: &str, domains: &[String]) -> bool {
    find_domain(url, domains).is_some()
}
