//! Persistence error types.

use thiserror::Error;

/// Errors that can occur while reading or writing pass outputs.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An input file produced by an earlier pass does not exist.
    #[error("Input file not found: {path}")]
    Missing { path: String },

    /// Failed to read or write a file.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to (de)serialize JSON.
    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Returns true if the error only means an input is missing.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}
