//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::StorageResult;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Suffix used for in-flight temporary files.
pub(crate) const TEMP_SUFFIX: &str = ".tmp";

/// A file-based storage backend.
///
/// The whole record set lives in one file. Every `replace` goes through a
/// sibling temporary file so the target path always holds either the old
/// or the new content, never a torn mix.
///
/// # Durability
///
/// With `sync_on_write` enabled (the default):
/// - the temporary file is `sync_all`ed before the rename
/// - the parent directory is fsynced after the rename (Unix only)
///
/// # Example
///
/// ```no_run
/// use lexidb_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::new(Path::new("vocab.json"));
/// backend.replace(b"[]").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    sync_on_write: bool,
}

impl FileBackend {
    /// Creates a backend for the file at `path`.
    ///
    /// The file is not touched until the first read or write.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            sync_on_write: true,
        }
    }

    /// Sets whether writes are fsynced before and after the rename.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read_all(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn replace(&mut self, data: &[u8]) -> StorageResult<()> {
        write_atomic(&self.path, data, self.sync_on_write)
    }
}

/// Writes `data` to `path` with the write-temp-then-rename pattern:
/// 1. Write to `<path>.tmp`
/// 2. Sync the temporary file (optional)
/// 3. Rename over `path`
/// 4. Fsync the parent directory (optional)
///
/// The temporary file is removed if any step before the rename fails.
pub(crate) fn write_atomic(path: &Path, data: &[u8], sync: bool) -> StorageResult<()> {
    let temp_path = temp_path_for(path);

    let written = (|| -> io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.flush()?;
        if sync {
            file.sync_all()?;
        }
        Ok(())
    })();

    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    if sync {
        if let Some(parent) = path.parent() {
            sync_directory(parent)?;
        }
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp: OsString = path.as_os_str().to_os_string();
    temp.push(TEMP_SUFFIX);
    PathBuf::from(temp)
}

/// Syncs a directory so a rename inside it is durable.
///
/// Windows NTFS journals metadata operations, so there is nothing to do
/// there.
#[cfg(unix)]
fn sync_directory(dir: &Path) -> StorageResult<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) -> StorageResult<()> {
    Ok(())
}
