//! # LexiDB Testkit
//!
//! Test utilities for LexiDB.
//!
//! This crate provides:
//! - Test stores on a temporary directory with a manual clock
//! - Backends that fail on demand, for error propagation tests
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use lexidb_testkit::prelude::*;
//! use lexidb_core::NewEntry;
//!
//! with_test_store(|store| {
//!     store.add(NewEntry::new("run", "sports")).unwrap();
//!     store.tick();
//!     store.add(NewEntry::new("walk", "sports")).unwrap();
//!     assert_eq!(store.list_backups().unwrap().len(), 1);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
