//! Error types for static lookup tables

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the lookup tables
#[derive(Error, Debug, Clone)]
pub enum TableError {
    /// The table file could not be read
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// A field dictionary key that is not a column index
    #[error("Invalid column key '{key}' in {table} field dictionary")]
    InvalidColumnKey { table: String, key: String },

    /// Franchise entry breaking the one-or-two segment shape
    #[error("Franchise {team} has {count} segments; expected 1 or 2")]
    SegmentCount { team: String, count: usize },

    /// Franchise segments that overlap or run backwards
    #[error("Franchise {team} has inconsistent segments: {reason}")]
    InvalidSegments { team: String, reason: String },
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self {
        TableError::JsonParse(e.to_string())
    }
}

pub(crate) fn read_table(path: &std::path::Path) -> Result<String, TableError> {
    std::fs::read_to_string(path).map_err(|e| TableError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
