//! Store configuration.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Default record file, relative to the store root.
pub const DEFAULT_DATA_FILE: &str = "data/vocab.json";

/// Default backup directory, relative to the store root.
pub const DEFAULT_BACKUP_DIR: &str = "backups";

/// Default export directory, relative to the store root.
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// Default backup file name prefix.
pub const DEFAULT_BACKUP_PREFIX: &str = "vocab";

/// Configuration for opening a store.
///
/// Relative paths are resolved against `root`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the store.
    pub root: PathBuf,

    /// Location of the record file.
    pub data_file: PathBuf,

    /// Directory receiving backup snapshots.
    pub backup_dir: PathBuf,

    /// Directory for tabular exports.
    pub export_dir: PathBuf,

    /// Backup names are `<prefix>_<YYYYmmdd_HHMMSS>.json`.
    pub backup_prefix: String,

    /// Whether to create missing directories on open.
    pub create_if_missing: bool,

    /// Whether to fsync on every persist (safer but slower).
    pub sync_on_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Config {
    /// Creates a configuration rooted at `root` with default layout.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            backup_prefix: DEFAULT_BACKUP_PREFIX.to_string(),
            create_if_missing: true,
            sync_on_write: true,
        }
    }

    /// Sets the record file location.
    #[must_use]
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Sets the backup directory.
    #[must_use]
    pub fn backup_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.backup_dir = path.into();
        self
    }

    /// Sets the export directory.
    #[must_use]
    pub fn export_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_dir = path.into();
        self
    }

    /// Sets the backup file name prefix.
    #[must_use]
    pub fn backup_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.backup_prefix = prefix.into();
        self
    }

    /// Sets whether to create missing directories on open.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to fsync on every persist.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Returns the resolved record file path.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.resolve(&self.data_file)
    }

    /// Returns the resolved backup directory.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        self.resolve(&self.backup_dir)
    }

    /// Returns the resolved export directory.
    #[must_use]
    pub fn export_path(&self) -> PathBuf {
        self.resolve(&self.export_dir)
    }

    /// Checks that the configuration can be opened.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the data file has no file
    /// name or the backup prefix is empty or contains a path separator.
    pub fn validate(&self) -> CoreResult<()> {
        if self.data_file.file_name().is_none() {
            return Err(CoreError::invalid_config(format!(
                "data file has no file name: {}",
                self.data_file.display()
            )));
        }
        if self.backup_prefix.is_empty() || self.backup_prefix.contains(['/', '\\']) {
            return Err(CoreError::invalid_config(format!(
                "backup prefix must be a non-empty file name fragment: {:?}",
                self.backup_prefix
            )));
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
