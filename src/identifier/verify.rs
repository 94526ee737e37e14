//! Uniqueness check over a finished output table

use super::builder::IdentifiedSegment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which identifier column a collision was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierColumn {
    #[serde(rename = "ID")]
    Id,
    #[serde(rename = "ID_IPU")]
    IdIpu,
}

impl std::fmt::Display for IdentifierColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id => write!(f, "ID"),
            Self::IdIpu => write!(f, "ID_IPU"),
        }
    }
}

/// A repeated identifier value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierCollision {
    pub column: IdentifierColumn,
    pub value: String,
    /// File of the first row carrying the value
    pub first_file: String,
    /// File of the repeating row
    pub file: String,
}

/// Find every repeated `ID` and `ID_IPU` value.
///
/// Each repeat after the first occurrence is reported once, in row order,
/// `ID` collisions before `ID_IPU` collisions.
pub fn find_collisions(rows: &[IdentifiedSegment]) -> Vec<IdentifierCollision> {
    let mut collisions = column_collisions(rows, IdentifierColumn::Id, |row| &row.id);
    collisions.extend(column_collisions(rows, IdentifierColumn::IdIpu, |row| &row.id_ipu));
    collisions
}

fn column_collisions<'a>(
    rows: &'a [IdentifiedSegment],
    column: IdentifierColumn,
    key: impl Fn(&'a IdentifiedSegment) -> &'a String,
) -> Vec<IdentifierCollision> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(rows.len());
    let mut collisions = Vec::new();

    for row in rows {
        let value = key(row);
        if let Some(first_file) = seen.get(value.as_str()) {
            collisions.push(IdentifierCollision {
                column,
                value: value.clone(),
                first_file: first_file.to_string(),
                file: row.file.clone(),
            });
        } else {
            seen.insert(value, &row.file);
        }
    }

    collisions
}
