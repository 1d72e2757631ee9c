use crate::state::MatchSet;
use crate::url::VariantMap;
use std::collections::BTreeSet;

/// Pages on which one target input was found, through any of its variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputResult {
    /// The input line as given
    pub query: String,

    /// Matching pages, sorted, at most the per-pattern cap
    pub pages: Vec<String>,
}

impl InputResult {
    pub fn found(&self) -> bool {
        !self.pages.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.pages.len()
    }
}

/// Folds pattern matches back onto the original inputs
///
/// Each input gets the union of pages matched by its variants, sorted and
/// truncated to the match set's cap. One result per input, in input order.
pub fn fold_results(variants: &VariantMap, matches: &MatchSet) -> Vec<InputResult> {
    variants
        .iter()
        .map(|(input, input_variants)| {
            let pages: BTreeSet<String> = input_variants
                .iter()
                .flat_map(|variant| matches.pages_for(variant))
                .collect();

            InputResult {
                query: input.to_string(),
                pages: pages.into_iter().take(matches.cap()).collect(),
            }
        })
        .collect()
}
