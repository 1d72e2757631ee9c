use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

/// Pages observed per pattern, capped per pattern
///
/// Written concurrently by page-scan tasks. Updates only ever add a page
/// to a pattern's set; once a pattern holds `cap` pages further matches for
/// it are dropped silently.
#[derive(Debug)]
pub struct MatchSet {
    cap: usize,
    pages_by_pattern: Mutex<HashMap<String, BTreeSet<String>>>,
}

impl MatchSet {
    /// Creates an empty match set storing at most `cap` pages per pattern
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            pages_by_pattern: Mutex::new(HashMap::new()),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, BTreeSet<String>>> {
        // A panicking writer cannot leave a set half-updated, so keep going
        self.pages_by_pattern
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records that `pattern` was seen on `page`
    ///
    /// Returns true if the page was newly stored.
    pub fn record(&self, pattern: &str, page: &str) -> bool {
        let mut map = self.lock();
        let pages = map.entry(pattern.to_string()).or_default();
        if pages.len() >= self.cap {
            return false;
        }
        pages.insert(page.to_string())
    }

    /// Records every pattern found on one page under a single lock
    ///
    /// Returns the number of patterns for which the page was newly stored.
    pub fn record_all<'a, I>(&self, patterns: I, page: &str) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = self.lock();
        let mut stored = 0;
        for pattern in patterns {
            let pages = map.entry(pattern.to_string()).or_default();
            if pages.len() < self.cap && pages.insert(page.to_string()) {
                stored += 1;
            }
        }
        stored
    }

    /// Pages stored for `pattern`
    pub fn pages_for(&self, pattern: &str) -> BTreeSet<String> {
        self.lock().get(pattern).cloned().unwrap_or_default()
    }

    /// Number of patterns with at least one stored page
    pub fn matched_pattern_count(&self) -> usize {
        self.lock().values().filter(|pages| !pages.is_empty()).count()
    }
}
