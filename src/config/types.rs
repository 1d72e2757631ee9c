use serde::Deserialize;

/// Main configuration structure for Sitemap-Sweep
///
/// Every section is optional in the TOML file; missing keys take the
/// documented defaults below. One value is built per run and never mutated
/// after validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// In-scope domains (host, or host:port)
    pub domains: Vec<String>,
    pub scanner: ScannerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: vec!["example.com".to_string()],
            scanner: ScannerConfig::default(),
            user_agent: UserAgentConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Which pattern matcher implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatcherPreference {
    /// Aho-Corasick when it builds, substring scan otherwise
    Auto,
    /// Aho-Corasick only (still falls back if construction fails)
    AhoCorasick,
    /// Pattern-by-pattern substring scan
    Substring,
}

/// Crawl and scan behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScannerConfig {
    /// URL schemes tried during sitemap discovery, in preference order
    pub schemes: Vec<String>,

    /// Maximum number of page URLs collected and scanned
    pub max_pages: usize,

    /// Maximum number of sitemap documents fetched
    pub sitemap_cap: usize,

    /// Number of page fetches allowed in flight at once
    pub concurrency: usize,

    /// Total timeout for a single request (seconds)
    pub request_timeout_secs: u64,

    /// Pause before each page request, charged inside the concurrency slot (milliseconds)
    pub politeness_delay_ms: u64,

    /// Maximum number of pages stored per pattern
    pub max_match_pages_per_query: usize,

    /// Scan raw page markup in addition to extracted links
    pub scan_body: bool,

    pub matcher: MatcherPreference,

    /// Render progress bars on stderr
    pub show_progress: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            schemes: vec!["https".to_string()],
            max_pages: 20_000,
            sitemap_cap: 5_000,
            concurrency: 4,
            request_timeout_secs: 25,
            politeness_delay_ms: 200,
            max_match_pages_per_query: 100,
            scan_body: true,
            matcher: MatcherPreference::Auto,
            show_progress: true,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler, also used as the robots.txt product token
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,

    /// Email address for crawler-related contact
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the full User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "URL-Scanner".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/url-scanner".to_string(),
            contact_email: "your@email.com".to_string(),
        }
    }
}

/// Input file configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Newline-delimited list of target strings
    pub path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "all-subdomains-and-domains.csv".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Crawl-mode results CSV
    pub results_path: String,

    /// Single-page mode results CSV
    pub test_results_path: String,

    /// Directory receiving the discovered sitemap/page URL lists
    pub diagnostics_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: "outputlist.csv".to_string(),
            test_results_path: "test_results.csv".to_string(),
            diagnostics_dir: ".".to_string(),
        }
    }
}
