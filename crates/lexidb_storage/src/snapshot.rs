//! Named snapshot stores for backups.
//!
//! A snapshot store holds point-in-time copies of the record file. Names
//! are chosen by the caller; writing an existing name overwrites it.

use crate::error::{StorageError, StorageResult};
use crate::file::{write_atomic, TEMP_SUFFIX};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A store of named, immutable-by-convention byte snapshots.
///
/// # Invariants
///
/// - `put(name, data)` followed by `get(name)` returns `data`
/// - `list` is sorted ascending by name
/// - Names never contain path separators
pub trait SnapshotStore: Send + Sync {
    /// Stores `data` under `name`, replacing any snapshot of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the write fails.
    fn put(&mut self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Returns the snapshot stored under `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the read fails.
    fn get(&self, name: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Lists all snapshot names in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    fn list(&self) -> StorageResult<Vec<String>>;
}

fn validate_name(name: &str) -> StorageResult<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.ends_with(TEMP_SUFFIX);
    if bad {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Snapshots stored as files in one directory.
#[derive(Debug, Clone)]
pub struct DirSnapshotStore {
    dir: PathBuf,
    sync_on_write: bool,
}

impl DirSnapshotStore {
    /// Creates a snapshot store rooted at `dir`.
    ///
    /// The directory must exist before the first `put`.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            sync_on_write: true,
        }
    }

    /// Sets whether snapshot writes are fsynced.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Returns the snapshot directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotStore for DirSnapshotStore {
    fn put(&mut self, name: &str, data: &[u8]) -> StorageResult<()> {
        validate_name(name)?;
        write_atomic(&self.dir.join(name), data, self.sync_on_write)
    }

    fn get(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_name(name)?;
        match fs::read(self.dir.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.ends_with(TEMP_SUFFIX) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Snapshots held in memory, for tests and ephemeral stores.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshots: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemorySnapshotStore {
    /// Creates an empty snapshot store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.read().len()
    }

    /// Returns `true` if no snapshot has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.read().is_empty()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn put(&mut self, name: &str, data: &[u8]) -> StorageResult<()> {
        validate_name(name)?;
        self.snapshots
            .write()
            .insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_name(name)?;
        Ok(self.snapshots.read().get(name).cloned())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.snapshots.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn dir_put_get_list() {
        let dir = tempdir().unwrap();
        let mut store = DirSnapshotStore::new(dir.path());

        store.put("vocab_20240102_000000.json", b"b").unwrap();
        store.put("vocab_20240101_000000.json", b"a").unwrap();

        assert_eq!(
            store.list().unwrap(),
            vec![
                "vocab_20240101_000000.json".to_string(),
                "vocab_20240102_000000.json".to_string(),
            ]
        );
        assert_eq!(
            store.get("vocab_20240101_000000.json").unwrap().unwrap(),
            b"a"
        );
        assert!(store.get("missing.json").unwrap().is_none());
    }

    #[test]
    fn dir_same_name_overwrites() {
        let dir = tempdir().unwrap();
        let mut store = DirSnapshotStore::new(dir.path()).sync_on_write(false);

        store.put("snap.json", b"old").unwrap();
        store.put("snap.json", b"new").unwrap();

        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.get("snap.json").unwrap().unwrap(), b"new");
    }

    #[test]
    fn dir_list_skips_subdirectories_and_temp_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("half.json.tmp"), b"x").unwrap();
        fs::write(dir.path().join("whole.json"), b"x").unwrap();

        let store = DirSnapshotStore::new(dir.path());
        assert_eq!(store.list().unwrap(), vec!["whole.json".to_string()]);
    }

    #[test]
    fn dir_missing_directory_lists_empty() {
        let dir = tempdir().unwrap();
        let store = DirSnapshotStore::new(&dir.path().join("backups"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn rejects_path_like_names() {
        let mut store = InMemorySnapshotStore::new();
        for name in ["", "..", "a/b", "a\\b", "x.tmp"] {
            assert!(matches!(
                store.put(name, b"x"),
                Err(StorageError::InvalidName(_))
            ));
        }
        assert!(store.is_empty());
    }

    proptest! {
        #[test]
        fn memory_list_is_sorted_and_deduplicated(
            names in prop::collection::vec("[a-z0-9_]{1,12}\\.json", 0..20)
        ) {
            let mut store = InMemorySnapshotStore::new();
            for name in &names {
                store.put(name, name.as_bytes()).unwrap();
            }

            let mut expected = names.clone();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(store.list().unwrap(), expected);
            prop_assert_eq!(store.len(), store.list().unwrap().len());
        }
    }
}
