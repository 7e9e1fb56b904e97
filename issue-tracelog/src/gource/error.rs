//! Log parsing error types.

use thiserror::Error;

/// Errors that can occur while parsing a Gource log line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogParseError {
    /// Fewer than the four mandatory fields.
    #[error("Expected 'timestamp|author|action|path', got '{line}'")]
    MissingFields { line: String },

    /// Timestamp is not an integer.
    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    /// Action is not one of A, M, D.
    #[error("Invalid action '{value}', expected A, M or D")]
    InvalidAction { value: String },

    /// Color is not six hex digits.
    #[error("Invalid color '{value}', expected six hex digits")]
    InvalidColor { value: String },
}
