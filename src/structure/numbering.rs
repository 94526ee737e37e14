//! Marker numbering
//!
//! Every segment marker gets a 1-based rank suffix counted over the whole
//! string, before any phrase splitting.

use super::marker::SEGMENT_MARKER;

/// A structure string with every `s` rewritten as `s<k>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberedStructure {
    text: String,
    segments: usize,
}

impl NumberedStructure {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Highest rank assigned (equals the number of `s` markers).
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for NumberedStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Append the occurrence rank to every segment marker.
///
/// Other characters pass through unchanged. A string without segment
/// markers comes back as-is.
pub fn number_markers(structure: &str) -> NumberedStructure {
    let mut text = String::with_capacity(structure.len() * 2);
    let mut rank = 0usize;

    for ch in structure.chars() {
        text.push(ch);
        if ch == SEGMENT_MARKER {
            rank += 1;
            text.push_str(&rank.to_string());
        }
    }

    NumberedStructure {
        text,
        segments: rank,
    }
}

/// Remove the digit run following every segment marker.
pub fn strip_numbering(numbered: &str) -> String {
    let mut stripped = String::with_capacity(numbered.len());
    let mut in_suffix = false;

    for ch in numbered.chars() {
        if in_suffix && ch.is_ascii_digit() {
            continue;
        }
        in_suffix = ch == SEGMENT_MARKER;
        stripped.push(ch);
    }

    stripped
}
