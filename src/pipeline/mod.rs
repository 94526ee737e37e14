//! The segmentation pipeline: validate → number → split → extract → identify

mod diagnostics;
mod runner;

pub use diagnostics::{
    Diagnostic, DiagnosticKind, DiagnosticsReport, RunSummary, Severity, Stage,
};
pub use runner::{PipelineOutput, RecordOutcome, SegmentationPipeline};
