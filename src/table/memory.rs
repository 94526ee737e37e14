//! In-memory tables

use super::traits::{AnnotationRecord, AnnotationSource, SegmentSink, TableResult};
use crate::identifier::IdentifiedSegment;

/// Holds records to read and rows written, without touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    records: Vec<AnnotationRecord>,
    rows: Vec<IdentifiedSegment>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<AnnotationRecord>) -> Self {
        Self {
            records,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, file: impl Into<String>, structure: impl Into<String>) {
        self.records.push(AnnotationRecord::new(file, structure));
    }

    /// Rows from the last `write_rows` call.
    pub fn rows(&self) -> &[IdentifiedSegment] {
        &self.rows
    }
}

impl AnnotationSource for MemoryTable {
    fn read_records(&mut self) -> TableResult<Vec<AnnotationRecord>> {
        Ok(self.records.clone())
    }
}

impl SegmentSink for MemoryTable {
    fn write_rows(&mut self, rows: &[IdentifiedSegment]) -> TableResult<()> {
        self.rows = rows.to_vec();
        Ok(())
    }
}
