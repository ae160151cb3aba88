//! # LexiDB Storage
//!
//! Storage backends for LexiDB.
//!
//! This crate provides the lowest-level storage abstraction for LexiDB.
//! Backends are **opaque byte stores** - they do not interpret the data
//! they store.
//!
//! ## Design Principles
//!
//! - The record file is a single blob that is read whole and replaced whole
//! - Replacement is atomic (write temp, sync, rename) so a crash never leaves
//!   a truncated record file behind
//! - Backup snapshots are named blobs in a [`SnapshotStore`]
//! - No knowledge of the JSON record format; LexiDB core owns that
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] / [`InMemorySnapshotStore`] - For testing
//! - [`FileBackend`] / [`DirSnapshotStore`] - For persistent storage
//!
//! ## Example
//!
//! ```rust
//! use lexidb_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! assert!(backend.read_all().unwrap().is_none());
//! backend.replace(b"[]").unwrap();
//! assert_eq!(backend.read_all().unwrap().as_deref(), Some(&b"[]"[..]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;
mod snapshot;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
pub use snapshot::{DirSnapshotStore, InMemorySnapshotStore, SnapshotStore};
