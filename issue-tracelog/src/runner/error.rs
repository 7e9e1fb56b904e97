//! Runner error types.

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings and credential errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Reading or writing pass outputs failed.
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// A network pass was requested without a token.
    #[error("A GitHub token is required for '{pass}'")]
    MissingToken { pass: &'static str },
}
