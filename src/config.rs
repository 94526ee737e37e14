//! Pipeline configuration
//!
//! Loaded from YAML; every field is optional. Command-line flags override
//! values read from a file.
//!
//! ```yaml
//! file_column: file
//! structure_column: structure
//! delimiter: ","
//! parallel: false
//! include_phrase_column: false
//! verify_identifiers: true
//! ```

use crate::structure::{PHRASE_MARKER, SEGMENT_MARKER};
use crate::table::TableLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid delimiter {0:?}: {1}")]
    Delimiter(char, &'static str),

    #[error("column name for {0} must not be empty")]
    EmptyColumn(&'static str),
}

/// Configuration for a segmentation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Input column holding the file identifier
    pub file_column: String,
    /// Input column holding the structure string
    pub structure_column: String,
    /// Field delimiter for both input and output tables
    pub delimiter: char,
    /// Process records with a parallel map
    pub parallel: bool,
    /// Append a `phrase` column to the output table
    pub include_phrase_column: bool,
    /// Check `ID`/`ID_IPU` uniqueness after a run
    pub verify_identifiers: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            file_column: "file".to_string(),
            structure_column: "structure".to_string(),
            delimiter: ',',
            parallel: false,
            include_phrase_column: false,
            verify_identifiers: true,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_phrase_column(mut self, include: bool) -> Self {
        self.include_phrase_column = include;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_column.is_empty() {
            return Err(ConfigError::EmptyColumn("file_column"));
        }
        if self.structure_column.is_empty() {
            return Err(ConfigError::EmptyColumn("structure_column"));
        }
        self.delimiter_byte().map(|_| ())
    }

    /// The delimiter as a single byte, as the table layer needs it.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        let d = self.delimiter;
        if !d.is_ascii() {
            return Err(ConfigError::Delimiter(d, "must be a single ASCII character"));
        }
        if d == SEGMENT_MARKER || d == PHRASE_MARKER {
            return Err(ConfigError::Delimiter(d, "collides with a structure marker"));
        }
        if d == '"' || d == '\n' || d == '\r' {
            return Err(ConfigError::Delimiter(d, "reserved by the table format"));
        }
        Ok(d as u8)
    }

    pub fn table_layout(&self) -> Result<TableLayout, ConfigError> {
        self.validate()?;
        Ok(TableLayout {
            file_column: self.file_column.clone(),
            structure_column: self.structure_column.clone(),
            delimiter: self.delimiter_byte()?,
            include_phrase_column: self.include_phrase_column,
        })
    }
}
