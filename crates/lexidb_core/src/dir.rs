//! Store directory management.
//!
//! This module handles the file system layout for LexiDB:
//!
//! ```text
//! <root>/
//! ├─ LOCK              # Advisory lock for single-writer
//! ├─ data/vocab.json   # Record file
//! ├─ backups/          # Backup snapshots
//! └─ exports/          # Tabular exports
//! ```
//!
//! Directory creation is an explicit step of opening a store, driven by
//! [`Config`]; nothing is created as a side effect of loading the crate.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lock file name within the store root.
const LOCK_FILE: &str = "LOCK";

/// Resolved store layout plus the exclusive directory lock.
///
/// Only one `StoreDir` can exist per root at a time, across processes. The
/// lock is released when the value is dropped.
#[derive(Debug)]
pub struct StoreDir {
    root: PathBuf,
    data_path: PathBuf,
    backup_dir: PathBuf,
    export_dir: PathBuf,
    _lock_file: File,
}

impl StoreDir {
    /// Opens (and, if configured, creates) the store layout.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The root, the record file's directory, or the backup directory
    ///   doesn't exist and `create_if_missing` is false
    /// - Another process holds the lock (returns `StoreLocked`)
    /// - I/O errors occur
    pub fn open(config: &Config) -> CoreResult<Self> {
        config.validate()?;

        let root = config.root.clone();
        let data_path = config.data_path();
        let backup_dir = config.backup_path();
        let export_dir = config.export_path();

        if !root.exists() && !config.create_if_missing {
            return Err(CoreError::invalid_config(format!(
                "store directory does not exist: {}",
                root.display()
            )));
        }

        if config.create_if_missing {
            fs::create_dir_all(&root)?;
            if let Some(parent) = data_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::create_dir_all(&backup_dir)?;
            fs::create_dir_all(&export_dir)?;
        }

        if !root.is_dir() {
            return Err(CoreError::invalid_config(format!(
                "path is not a directory: {}",
                root.display()
            )));
        }

        // Mutations write into both of these; exports create their own.
        let data_dir = data_path.parent().unwrap_or(root.as_path());
        for required in [data_dir, backup_dir.as_path()] {
            if !required.is_dir() {
                return Err(CoreError::invalid_config(format!(
                    "store directory is incomplete, missing: {}",
                    required.display()
                )));
            }
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(root.join(LOCK_FILE))?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(CoreError::StoreLocked);
        }

        debug!(root = %root.display(), "store directory opened");

        Ok(Self {
            root,
            data_path,
            backup_dir,
            export_dir,
            _lock_file: lock_file,
        })
    }

    /// Returns the store root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the record file path.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Returns the backup directory.
    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Returns the export directory.
    #[must_use]
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}
