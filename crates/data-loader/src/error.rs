//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while ingesting the rating stream or the movie
/// metadata feed, or while assembling the rating matrix from them.
#[derive(Error, Debug)]
pub enum InputError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Internal matrix state failed a consistency check
    #[error("Inconsistent matrix state: {0}")]
    Inconsistent(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, InputError>;
