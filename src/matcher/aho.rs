use crate::matcher::{MatcherKind, PatternMatcher};
use aho_corasick::{AhoCorasick, BuildError, MatchKind};
use std::collections::BTreeSet;

/// Aho-Corasick automaton over the full pattern set
///
/// Uses standard match semantics with overlapping iteration so that
/// patterns nested inside one another are all reported.
pub struct AhoCorasickMatcher {
    patterns: Vec<String>,
    automaton: AhoCorasick,
}

impl AhoCorasickMatcher {
    pub fn new(patterns: &BTreeSet<String>) -> Result<Self, BuildError> {
        let patterns: Vec<String> = patterns.iter().cloned().collect();
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)?;

        Ok(Self {
            patterns,
            automaton,
        })
    }
}

impl PatternMatcher for AhoCorasickMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::AhoCorasick
    }

    fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn find<'a>(&'a self, text: &str) -> BTreeSet<&'a str> {
        self.automaton
            .find_overlapping_iter(text)
            .map(|m| self.patterns[m.pattern().as_usize()].as_str())
            .collect()
    }
}
