//! ipuseg: Inter-Pausal Unit Segmentation
//!
//! Turns per-file structure annotations (strings over `s` for segment and
//! `p` for phrase boundary) into a table of individually identified
//! segments with file-scoped sequential identifiers.
//!
//! # Pipeline
//!
//! - **Numbering**: every `s` becomes `s<k>`, `k` its rank in the string
//! - **Phrase splitting**: the numbered string is split on `p`
//! - **Extraction**: each phrase group is split on `s`; every non-empty
//!   piece is a segment with a 1-based, per-file `ipu_index`
//! - **Identification**: `ID = prefix_token`, `ID_IPU = prefix_IPU_n`,
//!   where `prefix` is the first two `_`-separated parts of the file name
//!
//! # Example
//!
//! ```
//! use ipuseg::{AnnotationRecord, SegmentationPipeline};
//!
//! let pipeline = SegmentationPipeline::default();
//! let output = pipeline.run(&[AnnotationRecord::new("subj1_sess1_task", "ssssps")]);
//!
//! assert_eq!(output.rows.len(), 5);
//! assert_eq!(output.rows[4].id, "subj1_sess1_s5");
//! assert_eq!(output.rows[4].id_ipu, "subj1_sess1_IPU_5");
//! ```

pub mod config;
mod error;
pub mod identifier;
pub mod pipeline;
pub mod segment;
pub mod structure;
pub mod table;

pub use config::{ConfigError, PipelineConfig};
pub use error::{IpusegError, IpusegResult};
pub use identifier::{FilePrefix, IdentifiedSegment, IdentifierError};
pub use pipeline::{
    Diagnostic, DiagnosticKind, DiagnosticsReport, PipelineOutput, RunSummary,
    SegmentationPipeline, Severity, Stage,
};
pub use segment::{FileSegments, Segment};
pub use structure::{NumberedStructure, PhraseGroup, Structure, StructureError};
pub use table::{
    AnnotationRecord, AnnotationSource, CsvSink, CsvSource, DeferredFile, MemoryTable, SegmentSink,
    TableError, TableLayout,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
