//! Segment types

use serde::{Deserialize, Serialize};

/// One atomic segment (IPU) extracted from a file's structure string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Source file identifier
    pub file: String,
    /// Marker token, e.g. `s3`
    pub token: String,
    /// 1-based position among all segments of the file
    pub ipu_index: usize,
    /// Ordinal of the phrase group the segment came from
    pub phrase_index: usize,
}

impl Segment {
    /// Output label for the IPU counter, e.g. `IPU_3`.
    pub fn ipu_label(&self) -> String {
        format!("IPU_{}", self.ipu_index)
    }
}

/// The segments of one file plus the counter state after extraction.
///
/// `next_index` is the index the next retained segment would receive; it
/// starts at 1 for every file and is never shared between files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSegments {
    segments: Vec<Segment>,
    next_index: usize,
}

impl FileSegments {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            next_index: 1,
        }
    }

    pub(super) fn push(mut self, file: &str, token: String, phrase_index: usize) -> Self {
        self.segments.push(Segment {
            file: file.to_string(),
            token,
            ipu_index: self.next_index,
            phrase_index,
        });
        self.next_index += 1;
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for FileSegments {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for FileSegments {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}
