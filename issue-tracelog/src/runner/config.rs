//! Runner configuration.

use crate::model::RepoRef;
use crate::rate_limit::Pacing;
use std::path::{Path, PathBuf};

/// Native log read by the merge when no path is given.
pub const DEFAULT_NATIVE_LOG: &str = "gource_original.log";

/// Resolved configuration for a run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Repository to analyse.
    repo: RepoRef,
    /// GitHub token; only the network passes need one.
    token: Option<String>,
    /// Directory for pass outputs.
    output_dir: PathBuf,
    /// Delays between API calls.
    pacing: Pacing,
    /// Whether open issues get a timeline scan.
    include_open: bool,
}

impl RunnerConfig {
    /// Creates a configuration writing into `output_dir`.
    pub fn new(repo: RepoRef, output_dir: PathBuf) -> Self {
        Self {
            repo,
            token: None,
            output_dir,
            pacing: Pacing::default(),
            include_open: false,
        }
    }

    /// Sets the GitHub token.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the API call delays.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Enables timeline scans of open issues.
    pub fn with_include_open(mut self, include_open: bool) -> Self {
        self.include_open = include_open;
        self
    }

    /// Returns the repository.
    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the API call delays.
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Returns whether open issues get a timeline scan.
    pub fn include_open(&self) -> bool {
        self.include_open
    }

    /// Default native log location.
    pub fn default_native_log(&self) -> PathBuf {
        self.output_dir.join(DEFAULT_NATIVE_LOG)
    }
}
