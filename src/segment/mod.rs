//! Segment extraction: phrase groups to numbered IPUs

mod extract;
mod types;

pub use extract::{extract_segments, group_tokens};
pub use types::{FileSegments, Segment};
