//! API error types.

use thiserror::Error;

/// Errors that can occur while talking to the GitHub API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// GitHub API error, including non-success responses.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// A URL handed out by the API could not be parsed.
    #[error("Invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
