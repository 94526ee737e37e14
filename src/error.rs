//! Fatal errors for a whole run
//!
//! Per-record problems are not errors at this level; they are collected as
//! diagnostics by the pipeline.

use crate::config::ConfigError;
use crate::table::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IpusegError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for run-level operations
pub type IpusegResult<T> = Result<T, IpusegError>;
