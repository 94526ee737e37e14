//! Shared helpers for ipuseg integration tests
//!
//! Record fixtures, generated structure strings, and on-disk tables.

pub mod fixtures;

pub use fixtures::{random_structure, records, sample_table_csv, write_table};
