//! Entry identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an entry.
///
/// Entry IDs are:
/// - Assigned once at creation (a random UUID v4 in hyphenated form)
/// - Immutable once assigned, including across merges
/// - Opaque: any string read from the record file is accepted as is
///
/// Rows read without an id get one derived from their position and
/// identity in the file, so repeated reads of the same file agree on it
/// until the next write persists it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Creates a new random entry ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The placeholder for a row that was read without an id.
    pub(crate) fn unassigned() -> Self {
        Self(String::new())
    }

    /// Returns `true` for [`EntryId::unassigned`].
    pub(crate) fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }

    /// Derives the id of the id-less row at `index` of the record file.
    pub(crate) fn derived(index: usize, word: &str, topic: &str) -> Self {
        let key = format!("{index}\u{1f}{word}\u{1f}{topic}");
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_unique() {
        let id1 = EntryId::new();
        let id2 = EntryId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn new_is_hyphenated_uuid() {
        let id = EntryId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EntryId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: EntryId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn derived_is_stable_per_position() {
        let a = EntryId::derived(3, "run", "sports");
        assert_eq!(a, EntryId::derived(3, "run", "sports"));
        assert_ne!(a, EntryId::derived(4, "run", "sports"));
        assert!(Uuid::parse_str(a.as_str()).is_ok());
        assert!(!a.is_unassigned());
    }

    #[test]
    fn display_and_debug() {
        let id = EntryId::from("abc");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(format!("{id:?}"), "EntryId(abc)");
    }
}
