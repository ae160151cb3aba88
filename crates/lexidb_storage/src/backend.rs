//! Storage backend trait definition.

use crate::error::StorageResult;

/// A whole-blob storage backend for the LexiDB record file.
///
/// Backends are **opaque byte stores**. LexiDB reads the entire record set,
/// changes it in memory, and writes the entire set back, so a backend only
/// needs to hand out the current blob and replace it.
///
/// # Invariants
///
/// - `read_all` returns `None` until the first successful `replace`
/// - `read_all` after `replace(data)` returns exactly `data`
/// - `replace` is all-or-nothing: on error the previous blob is still intact
/// - Backends must be `Send + Sync` so a store can be shared across threads
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads the whole stored blob, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs other than "not found".
    fn read_all(&self) -> StorageResult<Option<Vec<u8>>>;

    /// Atomically replaces the stored blob with `data`.
    ///
    /// After this returns successfully, `data` is guaranteed to survive
    /// process termination (subject to the backend's sync policy).
    ///
    /// # Errors
    ///
    /// Returns an error if the write, sync, or rename fails. The previous
    /// blob is left untouched in that case.
    fn replace(&mut self, data: &[u8]) -> StorageResult<()>;
}
