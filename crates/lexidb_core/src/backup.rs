//! Backup snapshots of the record file.
//!
//! Before every mutating persist the store hands the record file's current
//! bytes to a [`BackupManager`], which writes them verbatim to a snapshot
//! named after the time of the mutation:
//!
//! ```text
//! <prefix>_<YYYYmmdd_HHMMSS>.json
//! ```
//!
//! Two mutations in the same second map to the same name and the later
//! snapshot replaces the earlier one.

use crate::error::{CoreError, CoreResult};
use crate::types::Timestamp;
use lexidb_storage::SnapshotStore;
use tracing::debug;

/// File extension of backup snapshots.
const BACKUP_EXTENSION: &str = ".json";

/// Names and stores backup snapshots.
pub struct BackupManager {
    snapshots: Box<dyn SnapshotStore>,
    prefix: String,
}

impl std::fmt::Debug for BackupManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackupManager")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl BackupManager {
    /// Creates a manager writing to `snapshots` with the given name prefix.
    #[must_use]
    pub fn new(snapshots: Box<dyn SnapshotStore>, prefix: impl Into<String>) -> Self {
        Self {
            snapshots,
            prefix: prefix.into(),
        }
    }

    /// Changes the name prefix used for new snapshots and listings.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// Returns the snapshot name used for a backup taken at `at`.
    #[must_use]
    pub fn name_for(&self, at: Timestamp) -> String {
        format!("{}_{}{}", self.prefix, at.compact(), BACKUP_EXTENSION)
    }

    /// Stores `data` as the snapshot for `at` and returns its name.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn snapshot(&mut self, data: &[u8], at: Timestamp) -> CoreResult<String> {
        let name = self.name_for(at);
        self.snapshots.put(&name, data)?;
        debug!(backup = %name, bytes = data.len(), "backup snapshot written");
        Ok(name)
    }

    /// Lists this manager's snapshots, oldest first.
    ///
    /// Files in the snapshot store that do not follow the naming scheme are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot store cannot be listed.
    pub fn list(&self) -> CoreResult<Vec<String>> {
        let stem = format!("{}_", self.prefix);
        Ok(self
            .snapshots
            .list()?
            .into_iter()
            .filter(|name| name.starts_with(&stem) && name.ends_with(BACKUP_EXTENSION))
            .collect())
    }

    /// Reads one snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BackupNotFound`] if no snapshot has that name.
    pub fn read(&self, name: &str) -> CoreResult<Vec<u8>> {
        self.snapshots
            .get(name)?
            .ok_or_else(|| CoreError::backup_not_found(name))
    }
}
