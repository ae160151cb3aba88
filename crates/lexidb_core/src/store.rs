//! The record store.
//!
//! Every operation reads the whole record set, applies its change in
//! memory, and (if anything changed) writes the whole set back. Each
//! persist is preceded by exactly one backup snapshot of the previous file
//! content, no matter how many rows the operation touched.
//!
//! ## Concurrency
//!
//! A single mutex covers each load-modify-persist sequence, so concurrent
//! callers in one process cannot interleave and lose updates. Across
//! processes the [`StoreDir`] lock keeps a second writer out.
//!
//! ## Example
//!
//! ```rust
//! use lexidb_core::{NewEntry, Store};
//!
//! let store = Store::open_in_memory();
//! store.add(NewEntry::new("run", "sports").familiarity(2)).unwrap();
//! store.add(NewEntry::new("RUN", "Sports").meaning("to move fast")).unwrap();
//!
//! let rows = store.load_all();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].meaning, "to move fast");
//! ```

use crate::backup::BackupManager;
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, DEFAULT_BACKUP_PREFIX};
use crate::dir::StoreDir;
use crate::entry::{familiarity, Entry, EntryId, NewEntry};
use crate::error::CoreResult;
use crate::filter::EntryFilter;
use crate::merge::{merge_or_append, MergeOutcome};
use crate::tabular::{entries_to_table, ColumnMap, Table};
use crate::types::Timestamp;
use lexidb_storage::{
    DirSnapshotStore, FileBackend, InMemoryBackend, InMemorySnapshotStore, SnapshotStore,
    StorageBackend,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// UTF-8 byte order mark, tolerated at the start of the record file.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The personal record store.
pub struct Store {
    inner: Mutex<StoreInner>,
    clock: Arc<dyn Clock>,
    dir: Option<StoreDir>,
}

/// State guarded by the store mutex.
struct StoreInner {
    backend: Box<dyn StorageBackend>,
    backups: BackupManager,
}

/// The record file as read at the start of a mutation.
struct Loaded {
    /// Exact bytes of the file, `None` if it does not exist.
    raw: Option<Vec<u8>>,
    /// Decoded rows in file order.
    rows: Vec<Entry>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Opens a file-backed store described by `config`.
    ///
    /// Creates the directory layout if configured to and takes the store
    /// lock. The record file itself is created by the first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the directories
    /// cannot be created, or another process holds the lock.
    pub fn open(config: &Config) -> CoreResult<Self> {
        let dir = StoreDir::open(config)?;
        let backend = FileBackend::new(dir.data_path()).sync_on_write(config.sync_on_write);
        let snapshots =
            DirSnapshotStore::new(dir.backup_dir()).sync_on_write(config.sync_on_write);

        info!(
            data = %dir.data_path().display(),
            backups = %dir.backup_dir().display(),
            "store opened"
        );

        let mut store = Self::with_backends(Box::new(backend), Box::new(snapshots))
            .with_backup_prefix(&config.backup_prefix);
        store.dir = Some(dir);
        Ok(store)
    }

    /// Creates an ephemeral store that keeps everything in memory.
    #[must_use]
    pub fn open_in_memory() -> Self {
        Self::with_backends(
            Box::new(InMemoryBackend::new()),
            Box::new(InMemorySnapshotStore::new()),
        )
    }

    /// Creates a store over explicit backends, using the system clock and
    /// the default backup prefix.
    #[must_use]
    pub fn with_backends(
        backend: Box<dyn StorageBackend>,
        snapshots: Box<dyn SnapshotStore>,
    ) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                backend,
                backups: BackupManager::new(snapshots, DEFAULT_BACKUP_PREFIX),
            }),
            clock: Arc::new(SystemClock),
            dir: None,
        }
    }

    /// Replaces the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the backup name prefix.
    #[must_use]
    pub fn with_backup_prefix(mut self, prefix: &str) -> Self {
        self.inner.get_mut().backups.set_prefix(prefix);
        self
    }

    /// Returns the directory layout for file-backed stores.
    #[must_use]
    pub fn dir(&self) -> Option<&StoreDir> {
        self.dir.as_ref()
    }

    /// Returns the current time according to the store's clock.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Returns every entry, most recently updated first.
    ///
    /// A missing, unreadable, or malformed record file reads as an empty
    /// set; this never fails. Rows without an id are listed under a stable
    /// derived one that id-based operations accept.
    #[must_use]
    pub fn load_all(&self) -> Vec<Entry> {
        let inner = self.inner.lock();
        let rows = match inner.backend.read_all() {
            Ok(raw) => raw.as_deref().map(decode_rows).unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "record file unreadable, treating as empty");
                Vec::new()
            }
        };
        drop(inner);
        sort_recent_first(rows)
    }

    /// Builds `new` with the store's clock and adds it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup or the write fails.
    pub fn add(&self, new: NewEntry) -> CoreResult<MergeOutcome> {
        self.add_entry(new.build_at(self.clock.now()))
    }

    /// Adds `entry`, merging it into an existing row with the same
    /// case-insensitive `(word, topic)` if there is one.
    ///
    /// Persists exactly once in either case.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file cannot be read, or the backup or
    /// the write fails.
    pub fn add_entry(&self, entry: Entry) -> CoreResult<MergeOutcome> {
        let now = self.clock.now();
        let mut inner = self.inner.lock();
        let Loaded { raw, mut rows } = inner.load()?;

        let outcome = merge_or_append(&mut rows, entry, now);
        inner.backup_then_write(raw.as_deref(), &rows, now)?;

        debug!(?outcome, rows = rows.len(), "entry added");
        Ok(outcome)
    }

    /// Adds `delta` to one entry's familiarity, clamped to `[1, 5]`.
    ///
    /// Returns `false` (and writes nothing) if no entry has `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file cannot be read or written.
    pub fn update_familiarity(&self, id: &EntryId, delta: i64) -> CoreResult<bool> {
        let changed = self.update_familiarity_batch(std::slice::from_ref(id), delta)?;
        Ok(changed > 0)
    }

    /// Adds `delta` to the familiarity of every entry in `ids`.
    ///
    /// Unknown ids are skipped. Returns the number of entries changed and
    /// persists once if that is non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file cannot be read or written.
    pub fn update_familiarity_batch(&self, ids: &[EntryId], delta: i64) -> CoreResult<usize> {
        self.rewrite_familiarity(ids, |current| {
            familiarity::clamp(i64::from(current).saturating_add(delta))
        })
    }

    /// Sets one entry's familiarity to `value`, clamped to `[1, 5]`.
    ///
    /// Returns `false` (and writes nothing) if no entry has `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file cannot be read or written.
    pub fn set_familiarity(&self, id: &EntryId, value: i64) -> CoreResult<bool> {
        let changed = self.set_familiarity_batch(std::slice::from_ref(id), value)?;
        Ok(changed > 0)
    }

    /// Sets the familiarity of every entry in `ids` to `value`, clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file cannot be read or written.
    pub fn set_familiarity_batch(&self, ids: &[EntryId], value: i64) -> CoreResult<usize> {
        let value = familiarity::clamp(value);
        self.rewrite_familiarity(ids, |_| value)
    }

    /// Removes the entry with `id`. Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file cannot be read or written.
    pub fn delete_entry(&self, id: &EntryId) -> CoreResult<bool> {
        let removed = self.delete_entries(std::slice::from_ref(id))?;
        Ok(removed > 0)
    }

    /// Removes every entry whose id is in `ids` and returns how many were
    /// removed. Persists once if that is non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file cannot be read or written.
    pub fn delete_entries(&self, ids: &[EntryId]) -> CoreResult<usize> {
        let wanted: HashSet<&EntryId> = ids.iter().collect();
        if wanted.is_empty() {
            return Ok(0);
        }

        let now = self.clock.now();
        let mut inner = self.inner.lock();
        let Loaded { raw, mut rows } = inner.load()?;

        let before = rows.len();
        rows.retain(|row| !wanted.contains(&row.id));
        let removed = before - rows.len();

        if removed > 0 {
            inner.backup_then_write(raw.as_deref(), &rows, now)?;
            info!(removed, "entries deleted");
        }
        Ok(removed)
    }

    /// Returns the record set as a table, most recently updated first, with
    /// phrases joined by `"; "`.
    #[must_use]
    pub fn export_tabular(&self) -> Table {
        entries_to_table(&self.load_all())
    }

    /// Imports rows of a table with one load and at most one persist.
    ///
    /// Each row with a non-blank `word` and `topic` goes through the same
    /// merge-or-append rule as [`Store::add_entry`]. Returns the number of
    /// rows processed (merged or appended); skipped rows are not counted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::MissingColumns`] before touching storage
    /// if `word` or `topic` is not a column, or an I/O error if the record
    /// file cannot be read or written.
    pub fn import_tabular(&self, table: &Table) -> CoreResult<usize> {
        let columns = ColumnMap::resolve(table.headers())?;

        let now = self.clock.now();
        let mut inner = self.inner.lock();
        let Loaded { raw, mut rows } = inner.load()?;

        let mut processed = 0;
        let mut appended = 0;
        for row in table.rows() {
            let Some(new) = columns.entry_for(row) else {
                continue;
            };
            if merge_or_append(&mut rows, new.build_at(now), now) == MergeOutcome::Appended {
                appended += 1;
            }
            processed += 1;
        }

        if processed > 0 {
            inner.backup_then_write(raw.as_deref(), &rows, now)?;
        }

        info!(
            processed,
            appended,
            merged = processed - appended,
            skipped = table.len() - processed,
            "tabular import finished"
        );
        Ok(processed)
    }

    /// Lists backup snapshot names, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot store cannot be listed.
    pub fn list_backups(&self) -> CoreResult<Vec<String>> {
        self.inner.lock().backups.list()
    }

    /// Returns the bytes of one backup snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::BackupNotFound`] if there is no such
    /// snapshot.
    pub fn read_backup(&self, name: &str) -> CoreResult<Vec<u8>> {
        self.inner.lock().backups.read(name)
    }

    /// Returns the entries matching `filter`, most recently updated first.
    #[must_use]
    pub fn filter(&self, filter: &EntryFilter) -> Vec<Entry> {
        self.load_all()
            .into_iter()
            .filter(|entry| filter.matches(entry))
            .collect()
    }

    /// Returns the distinct non-empty topics, sorted.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        self.load_all()
            .into_iter()
            .map(|entry| entry.topic)
            .filter(|topic| !topic.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn rewrite_familiarity<F>(&self, ids: &[EntryId], rewrite: F) -> CoreResult<usize>
    where
        F: Fn(u32) -> u32,
    {
        let wanted: HashSet<&EntryId> = ids.iter().collect();
        if wanted.is_empty() {
            return Ok(0);
        }

        let now = self.clock.now();
        let mut inner = self.inner.lock();
        let Loaded { raw, mut rows } = inner.load()?;

        let mut changed = 0;
        for row in rows.iter_mut().filter(|row| wanted.contains(&row.id)) {
            row.familiarity = rewrite(row.familiarity);
            row.touch(now);
            changed += 1;
        }

        if changed > 0 {
            inner.backup_then_write(raw.as_deref(), &rows, now)?;
            debug!(changed, "familiarity updated");
        }
        Ok(changed)
    }
}

impl StoreInner {
    /// Reads the record file for a mutation.
    ///
    /// Read failures are fatal here (a backup could not be taken anyway);
    /// malformed content still decodes as an empty set.
    fn load(&self) -> CoreResult<Loaded> {
        let raw = self.backend.read_all()?;
        let rows = raw.as_deref().map(decode_rows).unwrap_or_default();
        Ok(Loaded { raw, rows })
    }

    /// Snapshots `previous` (if the file existed) and then replaces the
    /// record file with `rows`.
    fn backup_then_write(
        &mut self,
        previous: Option<&[u8]>,
        rows: &[Entry],
        now: Timestamp,
    ) -> CoreResult<()> {
        if let Some(bytes) = previous {
            self.backups.snapshot(bytes, now)?;
        }
        let encoded = serde_json::to_vec_pretty(rows)?;
        self.backend.replace(&encoded)?;
        debug!(rows = rows.len(), bytes = encoded.len(), "record set persisted");
        Ok(())
    }
}

/// Decodes the record file row by row.
///
/// A file that is not a JSON array reads as empty. Within the array, only
/// elements that are not objects are skipped; every object decodes.
fn decode_rows(bytes: &[u8]) -> Vec<Entry> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let values = match serde_json::from_slice::<Vec<Value>>(bytes) {
        Ok(values) => values,
        Err(err) => {
            warn!(error = %err, "record file is malformed, treating as empty");
            return Vec::new();
        }
    };

    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| decode_row(index, value))
        .collect()
}

fn decode_row(index: usize, value: Value) -> Option<Entry> {
    if !value.is_object() {
        warn!(index, "record is not an object, skipping");
        return None;
    }
    match serde_json::from_value::<Entry>(value) {
        Ok(mut entry) => {
            if entry.id.is_unassigned() {
                entry.id = EntryId::derived(index, &entry.word, &entry.topic);
            }
            Some(entry)
        }
        Err(err) => {
            warn!(index, error = %err, "record is malformed, skipping");
            None
        }
    }
}

/// Sorts by `updated_at` descending; ties keep file order.
fn sort_recent_first(mut rows: Vec<Entry>) -> Vec<Entry> {
    rows.sort_by(|a, b| b.updated_at.at().cmp(&a.updated_at.at()));
    rows
}
