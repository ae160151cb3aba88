//! CLI command implementations.

pub mod add;
pub mod backups;
pub mod delete;
pub mod familiarity;
pub mod list;
pub mod transfer;

use lexidb_core::{Entry, EntryId};

/// Number of id characters shown in listings.
pub const SHORT_ID_LEN: usize = 8;

/// Resolves user-typed ids against `entries`.
///
/// Each argument may be a full id or a prefix matching exactly one entry.
/// Arguments matching nothing are passed through unchanged so the store
/// reports them as misses. Arguments naming the same id are kept once, in
/// first-seen order.
pub fn resolve_ids(entries: &[Entry], args: &[String]) -> Result<Vec<EntryId>, String> {
    let mut resolved: Vec<EntryId> = Vec::with_capacity(args.len());
    for arg in args {
        let id = if entries.iter().any(|e| e.id.as_str() == arg) {
            EntryId::from(arg.as_str())
        } else {
            let mut matches = entries.iter().filter(|e| e.id.as_str().starts_with(arg.as_str()));
            match (matches.next(), matches.next()) {
                (Some(entry), None) => entry.id.clone(),
                (Some(_), Some(_)) => return Err(format!("id prefix {arg:?} is ambiguous")),
                (None, _) => EntryId::from(arg.as_str()),
            }
        };
        if !resolved.contains(&id) {
            resolved.push(id);
        }
    }
    Ok(resolved)
}

/// Returns the leading characters of an id for display.
pub fn short_id(id: &EntryId) -> &str {
    let s = id.as_str();
    s.char_indices()
        .nth(SHORT_ID_LEN)
        .map_or(s, |(end, _)| &s[..end])
}
