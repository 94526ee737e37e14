//! Structure-string parsing
//!
//! The first two pipeline stages: validating a raw `s`/`p` string,
//! numbering its segment markers, and splitting it into phrase groups.

mod marker;
mod numbering;
mod phrase;

pub use marker::{Marker, Structure, StructureError, PHRASE_MARKER, SEGMENT_MARKER};
pub use numbering::{number_markers, strip_numbering, NumberedStructure};
pub use phrase::{split_phrases, PhraseGroup};
