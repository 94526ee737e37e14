//! Identifier builder
//!
//! Derives the `ID` and `ID_IPU` composite keys for each segment and checks
//! that a finished table holds no repeated keys.

mod builder;
mod verify;

pub use builder::{identify, FilePrefix, IdentifiedSegment, IdentifierError, KEY_SEPARATOR};
pub use verify::{find_collisions, IdentifierCollision, IdentifierColumn};
