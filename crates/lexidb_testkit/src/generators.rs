//! Property-based test generators using proptest.
//!
//! Provides strategies for generating entries and import tables. Words and
//! topics are drawn from small pools so generated batches regularly collide
//! on `(word, topic)` and exercise the merge path.

use lexidb_core::{NewEntry, Table};
use proptest::prelude::*;

/// Words used by [`word_strategy`].
pub const WORDS: [&str; 8] = [
    "run", "appetite", "bread", "journey", "swim", "deadline", "café", "ticket",
];

/// Topics used by [`topic_strategy`].
pub const TOPICS: [&str; 4] = ["Food", "Travel", "Sports", "Work"];

/// Randomizes the letter case of `value`.
fn recase(value: &str, mode: u8) -> String {
    match mode % 3 {
        0 => value.to_string(),
        1 => value.to_uppercase(),
        _ => value.to_lowercase(),
    }
}

/// Strategy for words from [`WORDS`] in random letter case.
pub fn word_strategy() -> impl Strategy<Value = String> {
    (prop::sample::select(WORDS.to_vec()), any::<u8>())
        .prop_map(|(word, mode)| recase(word, mode))
}

/// Strategy for topics from [`TOPICS`] in random letter case.
pub fn topic_strategy() -> impl Strategy<Value = String> {
    (prop::sample::select(TOPICS.to_vec()), any::<u8>())
        .prop_map(|(topic, mode)| recase(topic, mode))
}

/// Strategy for optional free text: empty about half of the time.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        1 => prop::string::string_regex("[a-z]{1,8}( [a-z]{1,8}){0,3}").expect("Invalid regex"),
    ]
}

/// Strategy for a phrase list, possibly with blanks and duplicates.
pub fn phrases_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::string::string_regex("[a-z]{1,6}( [a-z]{1,6})?").expect("Invalid regex"),
            1 => Just("  ".to_string()),
        ],
        0..5,
    )
}

/// Strategy for familiarity values, including out-of-range ones.
pub fn familiarity_strategy() -> impl Strategy<Value = u32> {
    0u32..9
}

/// Strategy for new entries.
pub fn new_entry_strategy() -> impl Strategy<Value = NewEntry> {
    (
        word_strategy(),
        topic_strategy(),
        text_strategy(),
        text_strategy(),
        phrases_strategy(),
        familiarity_strategy(),
    )
        .prop_map(|(word, topic, meaning, example, phrases, familiarity)| {
            NewEntry::new(word, topic)
                .meaning(meaning)
                .example(example)
                .phrases(phrases)
                .familiarity(familiarity)
        })
}

/// Columns of tables produced by [`import_table_strategy`].
pub const IMPORT_COLUMNS: [&str; 5] = ["Word", "Topic", "Meaning", "Phrases", "Familiarity"];

/// Strategy for one import row matching [`IMPORT_COLUMNS`].
pub fn import_row_strategy() -> impl Strategy<Value = Vec<String>> {
    (
        word_strategy(),
        topic_strategy(),
        text_strategy(),
        phrases_strategy(),
        prop_oneof![
            3 => (0u32..9).prop_map(|f| f.to_string()),
            1 => Just("high".to_string()),
            1 => Just(String::new()),
        ],
    )
        .prop_map(|(word, topic, meaning, phrases, familiarity)| {
            vec![word, topic, meaning, phrases.join("; "), familiarity]
        })
}

/// Strategy for import tables with `min_rows..max_rows` rows.
pub fn import_table_strategy(min_rows: usize, max_rows: usize) -> impl Strategy<Value = Table> {
    prop::collection::vec(import_row_strategy(), min_rows..max_rows).prop_map(|rows| {
        let mut table = Table::new(IMPORT_COLUMNS);
        for row in rows {
            table.push_row(row);
        }
        table
    })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
