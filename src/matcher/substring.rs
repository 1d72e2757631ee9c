use crate::matcher::{MatcherKind, PatternMatcher};
use std::collections::BTreeSet;

/// Checks each pattern with a plain substring search
pub struct SubstringMatcher {
    patterns: Vec<String>,
}

impl SubstringMatcher {
    pub fn new(patterns: &BTreeSet<String>) -> Self {
        Self {
            patterns: patterns.iter().cloned().collect(),
        }
    }
}

impl PatternMatcher for SubstringMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::Substring
    }

    fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn find<'a>(&'a self, text: &str) -> BTreeSet<&'a str> {
        self.patterns
            .iter()
            .filter(|p| text.contains(p.as_str()))
            .map(String::as_str)
            .collect()
    }
}
