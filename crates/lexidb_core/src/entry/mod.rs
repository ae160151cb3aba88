//! Entry model.
//!
//! An [`Entry`] is one vocabulary/note record. Entries are created through
//! [`NewEntry`], which normalizes input the way interactive forms and CSV
//! rows need:
//!
//! - all text fields are trimmed
//! - blank phrases are dropped (sorting and dedup happen on merge)
//! - familiarity literals that are not non-negative integers become 1
//! - `created_at` and `updated_at` are both set to "now"
//!
//! ## Example
//!
//! ```rust
//! use lexidb_core::NewEntry;
//!
//! let entry = NewEntry::new("  appetite ", "Food")
//!     .meaning("desire for food")
//!     .phrases(["lose one's appetite", "  "])
//!     .familiarity_literal("3")
//!     .build();
//!
//! assert_eq!(entry.word, "appetite");
//! assert_eq!(entry.phrases, vec!["lose one's appetite".to_string()]);
//! assert_eq!(entry.familiarity, 3);
//! assert_eq!(entry.created_at, entry.updated_at);
//! ```

pub mod familiarity;
mod id;

pub use id::EntryId;

use crate::clock::{Clock, SystemClock};
use crate::types::{RecordTime, Timestamp};
use familiarity::{default_familiarity, deserialize_lenient, DEFAULT_FAMILIARITY};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Separator used when phrases are flattened into one text cell.
pub const PHRASE_JOIN: &str = "; ";

/// A single vocabulary/note record.
///
/// Field names and their serialized order are the on-disk contract of the
/// record file. Decoding is lenient so files edited by hand still load:
/// missing or null text fields become empty strings, numbers and booleans
/// in text fields become their text, and a missing or null `id` decodes as
/// unassigned (the store gives such rows a stable id when it reads them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, never reassigned.
    #[serde(default = "EntryId::unassigned", deserialize_with = "id_or_unassigned")]
    pub id: EntryId,
    /// Primary label; identity key together with `topic`.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub word: String,
    /// Pronunciation.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub phonetic: String,
    /// Definition.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub meaning: String,
    /// Grouping label; identity key together with `word`.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub topic: String,
    /// Example sentence.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub example: String,
    /// Useful phrases and collocations.
    #[serde(default, deserialize_with = "strings_or_empty")]
    pub phrases: Vec<String>,
    /// Familiarity score, normally in `[1, 5]`.
    #[serde(
        default = "default_familiarity",
        deserialize_with = "deserialize_lenient"
    )]
    pub familiarity: u32,
    /// Free-form notes.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub notes: String,
    /// Set once at creation.
    #[serde(default)]
    pub created_at: RecordTime,
    /// Set at creation and on every mutation.
    #[serde(default)]
    pub updated_at: RecordTime,
}

impl Entry {
    /// Runs the entry factory on `new`, stamping it with the system clock.
    #[must_use]
    pub fn create(new: NewEntry) -> Self {
        new.build()
    }

    /// Returns `true` if this entry has the identity `(word, topic)`,
    /// compared case-insensitively.
    #[must_use]
    pub fn has_identity(&self, word: &str, topic: &str) -> bool {
        fold(&self.word) == fold(word) && fold(&self.topic) == fold(topic)
    }

    /// Returns the phrases joined with `"; "`.
    #[must_use]
    pub fn phrases_text(&self) -> String {
        self.phrases.join(PHRASE_JOIN)
    }

    /// Refreshes `updated_at`.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.into();
    }
}

/// Case folding used for identity comparison.
fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// Builder for new entries.
///
/// Every input is optional except the identity pair. Normalization happens
/// in [`NewEntry::build`] / [`NewEntry::build_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    word: String,
    topic: String,
    phonetic: String,
    meaning: String,
    example: String,
    phrases: Vec<String>,
    familiarity: u32,
    notes: String,
}

impl NewEntry {
    /// Starts a new entry for `word` under `topic`.
    #[must_use]
    pub fn new(word: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            topic: topic.into(),
            phonetic: String::new(),
            meaning: String::new(),
            example: String::new(),
            phrases: Vec::new(),
            familiarity: DEFAULT_FAMILIARITY,
            notes: String::new(),
        }
    }

    /// Sets the pronunciation.
    #[must_use]
    pub fn phonetic(mut self, value: impl Into<String>) -> Self {
        self.phonetic = value.into();
        self
    }

    /// Sets the definition.
    #[must_use]
    pub fn meaning(mut self, value: impl Into<String>) -> Self {
        self.meaning = value.into();
        self
    }

    /// Sets the example sentence.
    #[must_use]
    pub fn example(mut self, value: impl Into<String>) -> Self {
        self.example = value.into();
        self
    }

    /// Sets the phrases.
    #[must_use]
    pub fn phrases<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phrases = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the familiarity score. No clamping happens here.
    #[must_use]
    pub const fn familiarity(mut self, value: u32) -> Self {
        self.familiarity = value;
        self
    }

    /// Sets the familiarity from raw user input, see
    /// [`familiarity::parse_literal`].
    #[must_use]
    pub fn familiarity_literal(mut self, literal: &str) -> Self {
        self.familiarity = familiarity::parse_literal(literal);
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn notes(mut self, value: impl Into<String>) -> Self {
        self.notes = value.into();
        self
    }

    /// Builds the entry using the system clock.
    #[must_use]
    pub fn build(self) -> Entry {
        self.build_at(SystemClock.now())
    }

    /// Builds the entry with both timestamps set to `now`.
    #[must_use]
    pub fn build_at(self, now: Timestamp) -> Entry {
        Entry {
            id: EntryId::new(),
            word: self.word.trim().to_string(),
            phonetic: self.phonetic.trim().to_string(),
            meaning: self.meaning.trim().to_string(),
            topic: self.topic.trim().to_string(),
            example: self.example.trim().to_string(),
            phrases: self
                .phrases
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            familiarity: self.familiarity,
            notes: self.notes.trim().to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }
}

/// Text of a scalar JSON value; `None` for null, arrays, and objects.
fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn id_or_unassigned<'de, D>(deserializer: D) -> Result<EntryId, D::Error>
where
    D: Deserializer<'de>,
{
    let id = text_of(Value::deserialize(deserializer)?);
    Ok(id.map_or_else(EntryId::unassigned, EntryId::from))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn strings_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(text_of).collect(),
        _ => Vec::new(),
    })
}
