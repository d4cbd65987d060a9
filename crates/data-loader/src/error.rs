//! Error types for the data-loader crate.
//!
//! Only the ingestion path can fail. Building a `Catalog` from records that
//! are already in memory never returns an error: malformed records are
//! dropped at that boundary instead.

use thiserror::Error;

/// Errors that can occur while loading and parsing the TMDB catalog files
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected a record (bad quoting, wrong field count, ...)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A row in a data file couldn't be parsed
    ///
    /// `line` is the 1-based line number reported by the CSV reader
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
