//! Multi-pattern matching
//!
//! A [`PatternMatcher`] answers "which of these patterns occur in this text".
//! Two implementations return identical results and differ only in speed:
//! an Aho-Corasick automaton scanning in time independent of pattern count,
//! and a pattern-by-pattern substring scan used when the automaton cannot be
//! built or is not wanted.

mod aho;
mod substring;

pub use aho::AhoCorasickMatcher;
pub use substring::SubstringMatcher;

use crate::config::MatcherPreference;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// The implementation behind a matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    AhoCorasick,
    Substring,
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherKind::AhoCorasick => write!(f, "aho-corasick"),
            MatcherKind::Substring => write!(f, "substring"),
        }
    }
}

/// Exact, case-sensitive multi-substring search
pub trait PatternMatcher: Send + Sync {
    /// Which implementation this is
    fn kind(&self) -> MatcherKind;

    /// Number of patterns searched for
    fn pattern_count(&self) -> usize;

    /// Returns every pattern occurring at least once in `text`
    fn find<'a>(&'a self, text: &str) -> BTreeSet<&'a str>;
}

/// Builds a matcher for `patterns`, probing for the automaton first
///
/// With [`MatcherPreference::Substring`] the substring scan is used
/// directly. Otherwise the Aho-Corasick automaton is built and, if
/// construction fails, the substring scan takes its place.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use sitemap_sweep::config::MatcherPreference;
/// use sitemap_sweep::matcher::build_matcher;
///
/// let patterns: BTreeSet<String> =
///     ["example.com".to_string(), "example.com/a".to_string()].into();
/// let matcher = build_matcher(&patterns, MatcherPreference::Auto);
/// let found = matcher.find("see example.com/a/b");
/// assert_eq!(found.len(), 2);
/// ```
pub fn build_matcher(
    patterns: &BTreeSet<String>,
    preference: MatcherPreference,
) -> Arc<dyn PatternMatcher> {
    if preference == MatcherPreference::Substring {
        return Arc::new(SubstringMatcher::new(patterns));
    }

    match AhoCorasickMatcher::new(patterns) {
        Ok(matcher) => Arc::new(matcher),
        Err(e) => {
            tracing::warn!(
                "Aho-Corasick automaton unavailable ({}), using substring scan",
                e
            );
            Arc::new(SubstringMatcher::new(patterns))
        }
    }
}
