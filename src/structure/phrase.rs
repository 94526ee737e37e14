//! Phrase splitting

use super::marker::PHRASE_MARKER;

/// One piece of a numbered structure between phrase boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseGroup {
    /// 1-based position among all groups of the string, empty ones included
    pub ordinal: usize,
    pub text: String,
}

impl PhraseGroup {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split a numbered structure on every phrase boundary.
///
/// Order is preserved and empty groups are kept; filtering happens during
/// segment extraction.
pub fn split_phrases(numbered: &str) -> Vec<PhraseGroup> {
    numbered
        .split(PHRASE_MARKER)
        .enumerate()
        .map(|(i, text)| PhraseGroup {
            ordinal: i + 1,
            text: text.to_string(),
        })
        .collect()
}
