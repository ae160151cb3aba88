//! Read-side entry filtering for listings.

use crate::entry::familiarity::{MAX_FAMILIARITY, MIN_FAMILIARITY};
use crate::entry::Entry;

/// Criteria for selecting entries from a listing.
///
/// An empty filter matches everything. All set criteria must hold:
/// - `topics`: the entry's topic is one of them (exact match)
/// - familiarity range: inclusive bounds
/// - `keyword`: case-insensitive substring of `word`, `meaning`,
///   `example`, or the joined phrases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFilter {
    topics: Vec<String>,
    min_familiarity: u32,
    max_familiarity: u32,
    keyword: Option<String>,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            min_familiarity: MIN_FAMILIARITY,
            max_familiarity: MAX_FAMILIARITY,
            keyword: None,
        }
    }
}

impl EntryFilter {
    /// Creates a filter that matches every entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to entries whose topic is in `topics`.
    #[must_use]
    pub fn topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts to familiarity within `min..=max`.
    #[must_use]
    pub const fn familiarity_range(mut self, min: u32, max: u32) -> Self {
        self.min_familiarity = min;
        self.max_familiarity = max;
        self
    }

    /// Restricts to entries containing `keyword`. Blank keywords are ignored.
    #[must_use]
    pub fn keyword(mut self, keyword: impl AsRef<str>) -> Self {
        let keyword = keyword.as_ref().trim().to_lowercase();
        self.keyword = (!keyword.is_empty()).then_some(keyword);
        self
    }

    /// Returns `true` if `entry` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        if !self.topics.is_empty() && !self.topics.iter().any(|t| *t == entry.topic) {
            return false;
        }
        if entry.familiarity < self.min_familiarity || entry.familiarity > self.max_familiarity {
            return false;
        }
        let Some(keyword) = &self.keyword else {
            return true;
        };
        let phrases = entry.phrases_text();
        [
            entry.word.as_str(),
            entry.meaning.as_str(),
            entry.example.as_str(),
            phrases.as_str(),
        ]
        .iter()
        .any(|text| text.to_lowercase().contains(keyword.as_str()))
    }
}
