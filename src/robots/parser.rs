//! Robots.txt rules and sitemap directives

use robotstxt::DefaultMatcher;

/// One domain's robots.txt, or a permissive stand-in when none was fetched
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    content: String,
    allow_all: bool,
}

impl ParsedRobots {
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Ruleset used when robots.txt is missing or unreachable
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// True when no rule can ever block a URL
    pub fn is_allow_all(&self) -> bool {
        self.allow_all || self.content.trim().is_empty()
    }

    /// Checks whether `product_token` may fetch the absolute `url`
    ///
    /// Group selection and longest-match precedence follow the robotstxt
    /// crate, which mirrors Google's matcher.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL to check
    /// * `product_token` - User-agent token matched against `User-agent:` groups
    ///
    /// # Returns
    ///
    /// `true` if the URL may be fetched, always `true` for an allow-all ruleset
    pub fn is_allowed(&self, url: &str, product_token: &str) -> bool {
        if self.is_allow_all() {
            return true;
        }

        DefaultMatcher::default().one_agent_allowed_by_robots(&self.content, product_token, url)
    }
}

/// Extracts every `Sitemap:` directive from robots.txt content
///
/// The keyword is matched case-insensitively; empty values are skipped.
pub fn sitemap_directives(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let (key, value) = line.trim_start().split_once(':')?;
            if !key.trim().eq_ignore_ascii_case("sitemap") {
                return None;
            }
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect()
}
