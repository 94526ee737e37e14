//! Table layer trait definitions

use crate::identifier::IdentifiedSegment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading or writing tables
#[derive(Debug, Error)]
pub enum TableError {
    #[error("input table is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// One input row: a file identifier and its structure string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub file: String,
    pub structure: String,
}

impl AnnotationRecord {
    pub fn new(file: impl Into<String>, structure: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            structure: structure.into(),
        }
    }
}

/// Column names and delimiter shared by readers and writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Input column holding the file identifier
    pub file_column: String,
    /// Input column holding the structure string
    pub structure_column: String,
    pub delimiter: u8,
    /// Append a `phrase` column to the output
    pub include_phrase_column: bool,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            file_column: "file".to_string(),
            structure_column: "structure".to_string(),
            delimiter: b',',
            include_phrase_column: false,
        }
    }
}

/// Output column headers, in order.
pub const OUTPUT_COLUMNS: [&str; 5] = ["file", "split_string", "IPU_count", "ID", "ID_IPU"];

/// Header of the optional phrase column.
pub const PHRASE_COLUMN: &str = "phrase";

/// Where annotation records come from.
pub trait AnnotationSource {
    /// Read every record.
    ///
    /// Fails before returning any record when a required column is missing.
    fn read_records(&mut self) -> TableResult<Vec<AnnotationRecord>>;
}

/// Where identified segments go.
pub trait SegmentSink {
    /// Write the whole output table, header included.
    fn write_rows(&mut self, rows: &[IdentifiedSegment]) -> TableResult<()>;
}
