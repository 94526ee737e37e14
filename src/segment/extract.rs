//! Segment extraction
//!
//! Phrase groups are re-split on the plain segment marker. The digits that
//! numbering appended stay attached to the piece that follows the marker,
//! so a group `s1s2` yields the tokens `s1` and `s2`.

use super::types::FileSegments;
use crate::structure::{PhraseGroup, SEGMENT_MARKER};

/// Tokens of one phrase group, in order, empty pieces dropped.
pub fn group_tokens(group: &PhraseGroup) -> impl Iterator<Item = String> + '_ {
    group
        .text
        .split(SEGMENT_MARKER)
        .filter(|piece| !piece.is_empty())
        .map(|piece| format!("{}{}", SEGMENT_MARKER, piece))
}

/// Extract every segment of one file, numbering them from 1.
///
/// Groups are visited in order and tokens within a group left to right.
/// The counter is threaded through the fold and returned with the result.
pub fn extract_segments(file: &str, groups: &[PhraseGroup]) -> FileSegments {
    groups.iter().fold(FileSegments::new(), |acc, group| {
        group_tokens(group).fold(acc, |acc, token| acc.push(file, token, group.ordinal))
    })
}
