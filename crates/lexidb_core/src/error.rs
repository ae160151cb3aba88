//! Error types for LexiDB core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in LexiDB core operations.
///
/// Lookup misses on id-based operations are not errors; those report
/// `false` or a zero count instead.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] lexidb_storage::StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The record set could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Another process holds the store lock.
    #[error("store locked: another process has exclusive access")]
    StoreLocked,

    /// A tabular import lacks required columns.
    #[error("import requires columns word, topic; missing: {}", .missing.join(", "))]
    MissingColumns {
        /// Names of the required columns that were not found.
        missing: Vec<String>,
    },

    /// The store configuration is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// A requested backup snapshot does not exist.
    #[error("backup not found: {name}")]
    BackupNotFound {
        /// The snapshot name that was requested.
        name: String,
    },
}

impl CoreError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a missing columns error.
    pub fn missing_columns<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a backup not found error.
    pub fn backup_not_found(name: impl Into<String>) -> Self {
        Self::BackupNotFound { name: name.into() }
    }
}
