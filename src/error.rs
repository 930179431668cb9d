//! Error types for lasrust library

use std::io;
use thiserror::Error;

/// Main error type for lasrust operations
#[derive(Debug, Error)]
pub enum LasError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Content where no section may appear (before the first `~` line,
    /// a bare `~`, a second `~A` section, blank line inside the data)
    #[error("Malformed section at line {line}: {message}")]
    MalformedSection { line: usize, message: String },

    /// Header line without the `.` separating mnemonic and unit
    #[error("Missing mnemonic delimiter '.' at line {line}: '{text}'")]
    MissingMnemonicDelimiter { line: usize, text: String },

    /// Header line whose mnemonic is empty after trimming
    #[error("Empty mnemonic at line {line}: '{text}'")]
    EmptyMnemonic { line: usize, text: String },

    /// A section the format requires is absent
    #[error("Missing required section: {0}")]
    MissingRequiredSection(String),

    /// Token in the data matrix (or the NULL value) is not a number
    #[error("Numeric parse error at line {line}: '{token}'")]
    NumericParse { line: usize, token: String },

    /// Data ends (or a non-wrapped line ends) before a row is complete
    #[error("Truncated row at line {line}: expected {expected} values, found {found}")]
    TruncatedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Non-wrapped data line carrying more values than declared curves
    #[error("Malformed row at line {line}: expected {expected} values, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Lookup of an absent section or mnemonic
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unsupported LAS version for the requested operation
    #[error("Unsupported LAS version: {0:?}")]
    UnsupportedVersion(String),

    /// Programmatically built document violates a structural invariant
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Text could not be decoded
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl LasError {
    /// Physical line number the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            LasError::MalformedSection { line, .. }
            | LasError::MissingMnemonicDelimiter { line, .. }
            | LasError::EmptyMnemonic { line, .. }
            | LasError::NumericParse { line, .. }
            | LasError::TruncatedRow { line, .. }
            | LasError::MalformedRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for lasrust operations
pub type Result<T> = std::result::Result<T, LasError>;
