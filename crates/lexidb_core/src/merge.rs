//! Dedup/merge rule shared by single adds and bulk imports.
//!
//! An incoming entry is matched against the record set by its
//! case-insensitive `(word, topic)` identity. On a match the existing row
//! absorbs the incoming one:
//!
//! | Field                                  | Result                                   |
//! |----------------------------------------|------------------------------------------|
//! | `phonetic`, `meaning`, `example`, `notes` | incoming value if non-empty, else existing |
//! | `phrases`                              | sorted union, empty strings removed      |
//! | `familiarity`                          | maximum of both, clamped to `[1, 5]`     |
//! | `updated_at`                           | now                                      |
//! | `id`, `created_at`, `word`, `topic`    | existing values kept                     |
//!
//! Without a match the incoming entry is appended as built, with its
//! familiarity clamped into range.

use crate::entry::{familiarity, Entry};
use crate::types::Timestamp;
use std::collections::BTreeSet;

/// What the merge rule did with an incoming entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The entry was folded into an existing row.
    Merged,
    /// The entry was added as a new row.
    Appended,
}

/// Applies the merge-or-append rule for `incoming` to `rows`.
///
/// The scan is linear; the record set is personal-scale.
pub(crate) fn merge_or_append(
    rows: &mut Vec<Entry>,
    mut incoming: Entry,
    now: Timestamp,
) -> MergeOutcome {
    if let Some(existing) = rows
        .iter_mut()
        .find(|row| row.has_identity(&incoming.word, &incoming.topic))
    {
        merge_into(existing, incoming, now);
        return MergeOutcome::Merged;
    }

    incoming.familiarity = familiarity::clamp(i64::from(incoming.familiarity));
    rows.push(incoming);
    MergeOutcome::Appended
}

fn merge_into(existing: &mut Entry, incoming: Entry, now: Timestamp) {
    prefer_non_empty(&mut existing.phonetic, incoming.phonetic);
    prefer_non_empty(&mut existing.meaning, incoming.meaning);
    prefer_non_empty(&mut existing.example, incoming.example);
    prefer_non_empty(&mut existing.notes, incoming.notes);

    let union: BTreeSet<String> = existing
        .phrases
        .drain(..)
        .chain(incoming.phrases)
        .filter(|p| !p.is_empty())
        .collect();
    existing.phrases = union.into_iter().collect();

    let highest = existing.familiarity.max(incoming.familiarity);
    existing.familiarity = familiarity::clamp(i64::from(highest));
    existing.touch(now);
}

fn prefer_non_empty(slot: &mut String, incoming: String) {
    if !incoming.is_empty() {
        *slot = incoming;
    }
}
