//! Test fixtures and store helpers.
//!
//! Provides test stores driven by a [`ManualClock`], so every mutation can
//! get its own second (and its own backup name) without sleeping, plus
//! storage doubles that fail on demand.

use lexidb_core::{Config, ManualClock, Store, Timestamp};
use lexidb_storage::{
    InMemoryBackend, InMemorySnapshotStore, SnapshotStore, StorageBackend, StorageResult,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Time at which every test clock starts.
pub const TEST_START: &str = "2024-01-01 09:00:00";

/// Returns [`TEST_START`] as a timestamp.
pub fn test_start() -> Timestamp {
    Timestamp::parse(TEST_START).expect("valid test start timestamp")
}

/// A test store with automatic cleanup and a manual clock.
pub struct TestStore {
    /// The store instance.
    pub store: Store,
    /// The clock the store reads.
    pub clock: Arc<ManualClock>,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestStore {
    /// Creates a new in-memory test store.
    pub fn memory() -> Self {
        Self::with_backends(
            Box::new(InMemoryBackend::new()),
            Box::new(InMemorySnapshotStore::new()),
        )
    }

    /// Creates an in-memory test store whose record file already holds
    /// `data`.
    pub fn seeded(data: impl Into<Vec<u8>>) -> Self {
        Self::with_backends(
            Box::new(InMemoryBackend::with_data(data.into())),
            Box::new(InMemorySnapshotStore::new()),
        )
    }

    /// Creates a test store over explicit backends.
    pub fn with_backends(
        backend: Box<dyn StorageBackend>,
        snapshots: Box<dyn SnapshotStore>,
    ) -> Self {
        let clock = Arc::new(ManualClock::new(test_start()));
        let store = Store::with_backends(backend, snapshots).with_clock(clock.clone());
        Self {
            store,
            clock,
            _temp_dir: None,
        }
    }

    /// Creates a new file-backed test store in a temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config::new(temp_dir.path()).sync_on_write(false);
        let clock = Arc::new(ManualClock::new(test_start()));
        let store = Store::open(&config)
            .expect("Failed to open file store")
            .with_clock(clock.clone());

        Self {
            store,
            clock,
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns the store root if file-based, None if in-memory.
    pub fn path(&self) -> Option<&Path> {
        self._temp_dir.as_ref().map(TempDir::path)
    }

    /// Returns the record file path if file-based.
    pub fn data_path(&self) -> Option<PathBuf> {
        self.store.dir().map(|dir| dir.data_path().to_path_buf())
    }

    /// Advances the clock by one second.
    pub fn tick(&self) {
        self.clock.advance(1);
    }

    /// Returns the exact bytes of the record file, `None` if not written yet.
    ///
    /// Only available for file-backed stores.
    pub fn raw_file(&self) -> Option<Vec<u8>> {
        let path = self.data_path()?;
        std::fs::read(path).ok()
    }
}

impl std::ops::Deref for TestStore {
    type Target = Store;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Runs a test with a temporary in-memory store.
pub fn with_test_store<F, R>(f: F) -> R
where
    F: FnOnce(&TestStore) -> R,
{
    let store = TestStore::memory();
    f(&store)
}

/// Runs a test with a temporary file-based store.
pub fn with_file_store<F, R>(f: F) -> R
where
    F: FnOnce(&TestStore) -> R,
{
    let store = TestStore::file();
    f(&store)
}

/// A record file that can be read but never replaced.
#[derive(Debug, Default)]
pub struct ReadOnlyBackend {
    data: Option<Vec<u8>>,
}

impl ReadOnlyBackend {
    /// Creates a read-only backend holding `data`.
    pub fn with_data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

impl StorageBackend for ReadOnlyBackend {
    fn read_all(&self) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.data.clone())
    }

    fn replace(&mut self, _data: &[u8]) -> StorageResult<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "record file is read-only").into())
    }
}

/// A record file whose reads always fail.
#[derive(Debug, Default)]
pub struct UnreadableBackend;

impl StorageBackend for UnreadableBackend {
    fn read_all(&self) -> StorageResult<Option<Vec<u8>>> {
        Err(io::Error::other("record file unreadable").into())
    }

    fn replace(&mut self, _data: &[u8]) -> StorageResult<()> {
        Err(io::Error::other("record file unreadable").into())
    }
}

/// A snapshot store that rejects every write.
#[derive(Debug, Default)]
pub struct FailingSnapshotStore;

impl SnapshotStore for FailingSnapshotStore {
    fn put(&mut self, _name: &str, _data: &[u8]) -> StorageResult<()> {
        Err(io::Error::other("backup location unavailable").into())
    }

    fn get(&self, _name: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(None)
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexidb_core::{CoreError, NewEntry};

    #[test]
    fn memory_store_starts_empty() {
        let store = TestStore::memory();
        assert!(store.load_all().is_empty());
        assert!(store.path().is_none());
        assert!(store.raw_file().is_none());
    }

    #[test]
    fn file_store_has_layout() {
        let store = TestStore::file();
        let root = store.path().unwrap().to_path_buf();
        assert!(root.join("backups").is_dir());
        assert!(store.raw_file().is_none());

        store.add(NewEntry::new("run", "sports")).unwrap();
        assert!(store.raw_file().is_some());
    }

    #[test]
    fn tick_moves_store_clock() {
        let store = TestStore::memory();
        let before = store.now();
        store.tick();
        assert_eq!(store.now(), before.plus_seconds(1));
    }

    #[test]
    fn failing_backup_leaves_record_file_alone() {
        let store = TestStore::with_backends(
            Box::new(InMemoryBackend::with_data(b"[]".to_vec())),
            Box::new(FailingSnapshotStore),
        );

        let err = store.add(NewEntry::new("run", "sports")).unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn failing_write_propagates() {
        let store = TestStore::with_backends(
            Box::new(ReadOnlyBackend::with_data(b"[]".to_vec())),
            Box::new(InMemorySnapshotStore::new()),
        );

        assert!(store.add(NewEntry::new("run", "sports")).is_err());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn unreadable_file_loads_empty_but_mutations_fail() {
        let store = TestStore::with_backends(
            Box::new(UnreadableBackend),
            Box::new(InMemorySnapshotStore::new()),
        );

        assert!(store.load_all().is_empty());
        assert!(store.add(NewEntry::new("run", "sports")).is_err());
    }
}
