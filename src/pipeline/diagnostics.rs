//! Per-record diagnostics and the end-of-run report
//!
//! Rejected and degenerate records never abort a run. Each one becomes a
//! `Diagnostic` carrying enough context (file, stage, reason, input) to
//! find and fix the offending row.

use crate::identifier::{IdentifierCollision, IdentifierError};
use crate::segment::Segment;
use crate::structure::StructureError;
use crate::table::AnnotationRecord;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Structure-string validation
    Validate,
    /// Identifier construction
    Identify,
    /// Table-wide uniqueness check
    Verify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedStructure,
    NoSegmentsFound,
    MalformedFileKey,
    DuplicateIdentifier,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::MalformedStructure | Self::MalformedFileKey => Severity::Error,
            Self::NoSegmentsFound | Self::DuplicateIdentifier => Severity::Warning,
        }
    }

    pub fn stage(self) -> Stage {
        match self {
            Self::MalformedStructure | Self::NoSegmentsFound => Stage::Validate,
            Self::MalformedFileKey => Stage::Identify,
            Self::DuplicateIdentifier => Stage::Verify,
        }
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub stage: Stage,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    /// Structure string of the record, when the problem is record-level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
    /// Segment token, when the problem concerns a single segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            stage: kind.stage(),
            kind,
            severity: kind.severity(),
            message: message.into(),
            structure: None,
            token: None,
        }
    }

    pub fn structure(record: &AnnotationRecord, err: &StructureError) -> Self {
        let kind = if err.is_degenerate() {
            DiagnosticKind::NoSegmentsFound
        } else {
            DiagnosticKind::MalformedStructure
        };
        let mut diagnostic = Self::new(kind, &record.file, err.to_string());
        diagnostic.structure = Some(record.structure.clone());
        diagnostic
    }

    pub fn identifier(segment: &Segment, structure: &str, err: &IdentifierError) -> Self {
        let mut diagnostic = Self::new(DiagnosticKind::MalformedFileKey, &segment.file, err.to_string());
        diagnostic.structure = Some(structure.to_string());
        diagnostic.token = Some(segment.token.clone());
        diagnostic
    }

    pub fn collision(collision: &IdentifierCollision) -> Self {
        let message = format!(
            "{} value {:?} already produced by file {:?}",
            collision.column, collision.value, collision.first_file
        );
        Self::new(DiagnosticKind::DuplicateIdentifier, &collision.file, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}/{:?}] {}: {}", self.stage, self.kind, self.file, self.message)?;
        if let Some(token) = &self.token {
            write!(f, " (segment {})", token)?;
        }
        if let Some(structure) = &self.structure {
            write!(f, " (structure {:?})", structure)?;
        }
        Ok(())
    }
}

/// Counts describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub records_read: usize,
    /// Records that produced at least one row
    pub records_emitted: usize,
    /// Records dropped because of an error-severity diagnostic
    pub records_rejected: usize,
    /// Well-formed records without any segment marker
    pub records_empty: usize,
    pub rows_emitted: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl RunSummary {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Summary plus every diagnostic, as written to the JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub summary: RunSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsReport {
    pub fn new(summary: RunSummary, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            summary,
            diagnostics,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        file.flush()
    }
}
