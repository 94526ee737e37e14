//! Table layer
//!
//! Input records and output rows move through the `AnnotationSource` and
//! `SegmentSink` traits. `CsvSource`/`CsvSink` handle delimited text files;
//! `MemoryTable` keeps everything in memory.

mod delimited;
mod memory;
mod traits;

pub use delimited::{CsvSink, CsvSource, DeferredFile};
pub use memory::MemoryTable;
pub use traits::{
    AnnotationRecord, AnnotationSource, SegmentSink, TableError, TableLayout, TableResult,
    OUTPUT_COLUMNS, PHRASE_COLUMN,
};
