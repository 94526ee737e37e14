//! Composite identifier construction

use crate::segment::Segment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between components of a file identifier and of built keys.
pub const KEY_SEPARATOR: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("file key {0:?} needs at least two '_'-separated components")]
    MalformedFileKey(String),
}

/// Namespace derived from the first two components of a file identifier.
///
/// `subj1_sess1_task` becomes `subj1_sess1`. Components may be empty:
/// `x__y` and `x_` both yield `x_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePrefix(String);

impl FilePrefix {
    pub fn parse(file: &str) -> Result<Self, IdentifierError> {
        let mut parts = file.split(KEY_SEPARATOR);
        match (parts.next(), parts.next()) {
            (Some(subject), Some(session)) => {
                Ok(Self(format!("{}{}{}", subject, KEY_SEPARATOR, session)))
            }
            _ => Err(IdentifierError::MalformedFileKey(file.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `prefix_token`, e.g. `subj1_sess1_s3`.
    pub fn segment_id(&self, token: &str) -> String {
        format!("{}{}{}", self.0, KEY_SEPARATOR, token)
    }

    /// `prefix_IPU_n`, e.g. `subj1_sess1_IPU_3`.
    pub fn ipu_id(&self, ipu_index: usize) -> String {
        format!("{}{}IPU_{}", self.0, KEY_SEPARATOR, ipu_index)
    }
}

impl std::fmt::Display for FilePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A segment with both composite keys attached. One output row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifiedSegment {
    pub file: String,
    pub token: String,
    pub ipu_index: usize,
    pub phrase_index: usize,
    pub id: String,
    pub id_ipu: String,
}

impl IdentifiedSegment {
    pub fn new(segment: &Segment, prefix: &FilePrefix) -> Self {
        Self {
            file: segment.file.clone(),
            token: segment.token.clone(),
            ipu_index: segment.ipu_index,
            phrase_index: segment.phrase_index,
            id: prefix.segment_id(&segment.token),
            id_ipu: prefix.ipu_id(segment.ipu_index),
        }
    }

    /// Value of the `IPU_count` output column.
    pub fn ipu_label(&self) -> String {
        format!("IPU_{}", self.ipu_index)
    }

    /// Value of the optional `phrase` output column.
    pub fn phrase_label(&self) -> String {
        format!("phrase_{}", self.phrase_index)
    }
}

/// Build the identifiers for one segment from its own file name.
pub fn identify(segment: &Segment) -> Result<IdentifiedSegment, IdentifierError> {
    let prefix = FilePrefix::parse(&segment.file)?;
    Ok(IdentifiedSegment::new(segment, &prefix))
}
