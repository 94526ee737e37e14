//! Segmentation pipeline runner
//!
//! Steps per record:
//! 1. Validate the structure string
//! 2. Number segment markers over the whole string
//! 3. Split into phrase groups
//! 4. Extract segments with a file-scoped counter
//! 5. Build identifiers
//!
//! Records are independent. The run concatenates their rows in input
//! order, then checks identifier uniqueness across the whole table.

use super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsReport, RunSummary, Severity};
use crate::config::PipelineConfig;
use crate::error::IpusegResult;
use crate::identifier::{find_collisions, identify, IdentifiedSegment};
use crate::segment::extract_segments;
use crate::structure::{number_markers, split_phrases, Structure};
use crate::table::{AnnotationRecord, AnnotationSource, SegmentSink};
use rayon::prelude::*;
use tracing::{debug, debug_span, info, warn};

/// What one record produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub file: String,
    pub rows: Vec<IdentifiedSegment>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RecordOutcome {
    fn dropped(record: &AnnotationRecord, diagnostic: Diagnostic) -> Self {
        Self {
            file: record.file.clone(),
            rows: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }

    /// True when an error-severity diagnostic left the record without rows.
    pub fn is_rejected(&self) -> bool {
        self.rows.is_empty() && self.diagnostics.iter().any(Diagnostic::is_error)
    }

    fn is_empty_record(&self) -> bool {
        self.rows.is_empty()
            && self
                .diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::NoSegmentsFound)
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub rows: Vec<IdentifiedSegment>,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: RunSummary,
}

impl PipelineOutput {
    pub fn report(&self) -> DiagnosticsReport {
        DiagnosticsReport::new(self.summary, self.diagnostics.clone())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Turns annotation records into identified segment rows.
#[derive(Debug, Clone, Default)]
pub struct SegmentationPipeline {
    config: PipelineConfig,
}

impl SegmentationPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage for a single record.
    pub fn process_record(&self, record: &AnnotationRecord) -> RecordOutcome {
        let _span = debug_span!("record", file = %record.file).entered();

        let structure = match Structure::parse(&record.structure) {
            Ok(structure) => structure,
            Err(err) => return RecordOutcome::dropped(record, Diagnostic::structure(record, &err)),
        };

        let numbered = number_markers(structure.as_str());
        let groups = split_phrases(numbered.as_str());
        let extracted = extract_segments(&record.file, &groups);
        debug!(
            numbered = %numbered,
            phrases = groups.len(),
            segments = extracted.len(),
            "extracted segments"
        );

        let mut rows = Vec::with_capacity(extracted.len());
        let mut diagnostics = Vec::new();
        for segment in extracted.segments() {
            match identify(segment) {
                Ok(row) => rows.push(row),
                Err(err) => diagnostics.push(Diagnostic::identifier(segment, &record.structure, &err)),
            }
        }

        RecordOutcome {
            file: record.file.clone(),
            rows,
            diagnostics,
        }
    }

    /// Process every record and assemble the output table.
    ///
    /// Output order follows input order regardless of `parallel`.
    pub fn run(&self, records: &[AnnotationRecord]) -> PipelineOutput {
        let outcomes: Vec<RecordOutcome> = if self.config.parallel {
            records.par_iter().map(|r| self.process_record(r)).collect()
        } else {
            records.iter().map(|r| self.process_record(r)).collect()
        };

        let mut summary = RunSummary {
            records_read: records.len(),
            ..RunSummary::default()
        };
        let mut rows = Vec::new();
        let mut diagnostics = Vec::new();

        for outcome in outcomes {
            if outcome.is_rejected() {
                summary.records_rejected += 1;
            } else if outcome.is_empty_record() {
                summary.records_empty += 1;
            } else if !outcome.rows.is_empty() {
                summary.records_emitted += 1;
            }
            rows.extend(outcome.rows);
            diagnostics.extend(outcome.diagnostics);
        }

        if self.config.verify_identifiers {
            diagnostics.extend(find_collisions(&rows).iter().map(Diagnostic::collision));
        }

        summary.rows_emitted = rows.len();
        for diagnostic in &diagnostics {
            match diagnostic.severity {
                Severity::Warning => summary.warnings += 1,
                Severity::Error => summary.errors += 1,
            }
        }

        for diagnostic in &diagnostics {
            warn!("{}", diagnostic);
        }
        info!(
            records = summary.records_read,
            emitted = summary.records_emitted,
            rejected = summary.records_rejected,
            empty = summary.records_empty,
            rows = summary.rows_emitted,
            warnings = summary.warnings,
            errors = summary.errors,
            "segmentation run complete"
        );

        PipelineOutput {
            rows,
            diagnostics,
            summary,
        }
    }

    /// Read all records from `source`, run, and write the rows to `sink`.
    ///
    /// Table errors (missing columns included) abort before any record is
    /// processed, and the sink is not written to. Sinks that open their
    /// destination lazily, like [`CsvSink::create`](crate::CsvSink::create),
    /// leave an existing output untouched in that case.
    pub fn run_tables<S, K>(&self, source: &mut S, sink: &mut K) -> IpusegResult<PipelineOutput>
    where
        S: AnnotationSource + ?Sized,
        K: SegmentSink + ?Sized,
    {
        let records = source.read_records()?;
        debug!(records = records.len(), "loaded input table");
        let output = self.run(&records);
        sink.write_rows(&output.rows)?;
        Ok(output)
    }
}
