//! Marker alphabet and structure-string validation
//!
//! A structure string is a sequence over `{s, p}`: `s` marks one segment
//! (an inter-pausal unit), `p` marks a phrase boundary.

use thiserror::Error;

/// Character marking one segment occurrence.
pub const SEGMENT_MARKER: char = 's';

/// Character marking a phrase boundary.
pub const PHRASE_MARKER: char = 'p';

/// One symbol of the structure alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Segment,
    Phrase,
}

impl Marker {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            SEGMENT_MARKER => Some(Self::Segment),
            PHRASE_MARKER => Some(Self::Phrase),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Segment => SEGMENT_MARKER,
            Self::Phrase => PHRASE_MARKER,
        }
    }
}

/// Why a structure string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("structure string is empty")]
    Empty,
    #[error("invalid marker {ch:?} at position {position} (expected 's' or 'p')")]
    InvalidMarker { ch: char, position: usize },
    #[error("structure string contains no segment markers")]
    NoSegments,
}

impl StructureError {
    /// True for well-formed strings that simply carry no segments.
    ///
    /// Degenerate records produce zero rows and a warning; every other
    /// variant rejects the record.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::NoSegments)
    }
}

/// A validated structure string.
///
/// Non-empty, drawn only from the marker alphabet, and containing at least
/// one segment marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Structure<'a> {
    raw: &'a str,
    segments: usize,
    phrases: usize,
}

impl<'a> Structure<'a> {
    pub fn parse(raw: &'a str) -> Result<Self, StructureError> {
        if raw.is_empty() {
            return Err(StructureError::Empty);
        }

        let mut segments = 0;
        let mut phrases = 0;
        for (position, ch) in raw.chars().enumerate() {
            match Marker::from_char(ch) {
                Some(Marker::Segment) => segments += 1,
                Some(Marker::Phrase) => phrases += 1,
                None => return Err(StructureError::InvalidMarker { ch, position }),
            }
        }

        if segments == 0 {
            return Err(StructureError::NoSegments);
        }

        Ok(Self {
            raw,
            segments,
            phrases,
        })
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Number of `s` markers.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Number of `p` markers.
    pub fn phrase_boundary_count(&self) -> usize {
        self.phrases
    }

    pub fn markers(&self) -> impl Iterator<Item = Marker> + 'a {
        self.raw.chars().filter_map(Marker::from_char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_counts_markers() {
        let structure = Structure::parse("ssssps").unwrap();
        assert_eq!(structure.segment_count(), 5);
        assert_eq!(structure.phrase_boundary_count(), 1);
        assert_eq!(structure.as_str(), "ssssps");
    }

    #[test]
    fn empty_string_is_rejected() {
        assert_eq!(Structure::parse(""), Err(StructureError::Empty));
    }

    #[test]
    fn foreign_character_reports_position() {
        let err = Structure::parse("ssxps").unwrap_err();
        assert_eq!(err, StructureError::InvalidMarker { ch: 'x', position: 2 });
        assert!(!err.is_degenerate());
    }

    #[test]
    fn uppercase_markers_are_foreign() {
        assert!(matches!(
            Structure::parse("sSp"),
            Err(StructureError::InvalidMarker { ch: 'S', position: 1 })
        ));
    }

    #[test]
    fn phrase_only_string_is_degenerate() {
        let err = Structure::parse("ppp").unwrap_err();
        assert_eq!(err, StructureError::NoSegments);
        assert!(err.is_degenerate());
    }

    #[test]
    fn markers_iterate_in_order() {
        let structure = Structure::parse("sps").unwrap();
        let markers: Vec<Marker> = structure.markers().collect();
        assert_eq!(markers, vec![Marker::Segment, Marker::Phrase, Marker::Segment]);
        assert_eq!(markers[1].as_char(), 'p');
    }
}
