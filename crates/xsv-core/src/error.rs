//! Error types for xsv-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in xsv-core
///
/// Malformed quoting, ragged rows and unparseable scalars are all recovered
/// locally and never show up here.
#[derive(Debug, Error)]
pub enum Error {
    /// An enum or flags column held a token that names no member
    #[error("invalid value '{value}' for {type_name}")]
    InvalidValue { type_name: &'static str, value: String },

    /// Two columns of a record type claim the same position
    #[error("column index {index} is bound more than once in {type_name}")]
    DuplicateColumnIndex { type_name: &'static str, index: usize },

    /// Positional columns of a record type do not run densely from 0
    #[error("column indices of {type_name} are not dense: expected {expected}, found {found}")]
    SparseColumnIndex {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    /// Dialect name could not be recognised
    #[error("unknown dialect '{0}', expected one of: csv, comma, tsv, tab")]
    UnknownDialect(String),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
