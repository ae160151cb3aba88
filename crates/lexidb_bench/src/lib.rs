//! Benchmark utilities for LexiDB.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
