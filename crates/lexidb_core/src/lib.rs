//! # LexiDB Core
//!
//! Core record store for LexiDB, a personal vocabulary and note keeper.
//!
//! This crate provides:
//! - The [`Entry`] model and its [`NewEntry`] builder
//! - [`Store`], which keeps the whole record set in one JSON file
//! - Merge-on-write deduplication by case-insensitive `(word, topic)`
//! - A timestamped backup snapshot before every persist
//! - Tabular import/export through [`Table`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lexidb_core::{Config, NewEntry, Store};
//!
//! let store = Store::open(&Config::new("./my_vocab"))?;
//! store.add(NewEntry::new("appetite", "Food").meaning("desire for food"))?;
//!
//! for entry in store.load_all() {
//!     println!("{} [{}] {}", entry.word, entry.topic, entry.familiarity);
//! }
//! # Ok::<(), lexidb_core::CoreError>(())
//! ```
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├─ LOCK
//! ├─ data/vocab.json
//! ├─ backups/vocab_<YYYYmmdd_HHMMSS>.json
//! └─ exports/
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backup;
mod clock;
mod config;
mod dir;
mod entry;
mod error;
mod filter;
mod merge;
mod store;
mod tabular;
mod types;

pub use backup::BackupManager;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    Config, DEFAULT_BACKUP_DIR, DEFAULT_BACKUP_PREFIX, DEFAULT_DATA_FILE, DEFAULT_EXPORT_DIR,
};
pub use dir::StoreDir;
pub use entry::familiarity;
pub use entry::{Entry, EntryId, NewEntry, PHRASE_JOIN};
pub use error::{CoreError, CoreResult};
pub use filter::EntryFilter;
pub use merge::MergeOutcome;
pub use store::Store;
pub use tabular::{entries_to_table, split_phrases, ColumnMap, Field, Table};
pub use types::{RecordTime, Timestamp, BACKUP_TIMESTAMP_FORMAT, TIMESTAMP_FORMAT};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
