//! Orchestrates the passes.
//!
//! Each pass reads the file written by the one before it, so passes can be
//! run one at a time or chained with [`Command::All`].

mod config;
mod error;

pub use config::{RunnerConfig, DEFAULT_NATIVE_LOG};
pub use error::RunnerError;

use crate::fetch::fetch_issues;
use crate::github::{GitHubClient, IssueApi};
use crate::gource::{detailed_log, merge_logs, simple_log, ActionCounts, LogEntry};
use crate::linker::{link_issues, LinkOptions};
use crate::metrics::TraceabilityReport;
use crate::model::Issue;
use crate::store::{load_native_log, save_log, Store, StoreError};
use crate::summary::RunSummary;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Which Gource log to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GourceMode {
    /// Issue lifecycles with their touched files.
    Simple,
    /// Issues grouped under file branches.
    Detailed,
    /// Detailed entries interleaved with a native log.
    Merged,
}

impl fmt::Display for GourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simple => "simple",
            Self::Detailed => "detailed",
            Self::Merged => "merged",
        })
    }
}

/// A unit of work for the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Download the issue listing.
    Fetch,
    /// Link downloaded issues to commits and pull requests.
    Link,
    /// Compute the traceability report.
    Metrics,
    /// Write one Gource log.
    Gource {
        mode: GourceMode,
        /// Native log for [`GourceMode::Merged`].
        native_log: Option<PathBuf>,
        /// Output path; defaults to the repository-named file.
        output: Option<PathBuf>,
    },
    /// Every pass, then all three logs. The merge runs only if the native
    /// log exists.
    All { native_log: Option<PathBuf> },
}

impl Command {
    /// Returns true if the command talks to GitHub.
    #[must_use]
    pub fn needs_network(&self) -> bool {
        matches!(self, Self::Fetch | Self::Link | Self::All { .. })
    }
}

/// Runs passes against one repository and output directory.
pub struct Runner {
    config: RunnerConfig,
    store: Store,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    pub fn new(config: RunnerConfig) -> Self {
        let store = Store::new(config.output_dir(), config.repo().clone());
        Self { config, store }
    }

    /// Returns the store used for pass outputs.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Executes `command`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on missing credentials or unwritable
    /// outputs. Missing inputs are recorded in the summary instead.
    pub async fn run(&self, command: &Command) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new();

        match command {
            Command::Fetch => {
                let client = self.client("fetch")?;
                self.fetch(&client, &mut summary).await?;
            }
            Command::Link => {
                let client = self.client("link")?;
                self.link(&client, &mut summary).await?;
            }
            Command::Metrics => self.metrics(&mut summary)?,
            Command::Gource {
                mode,
                native_log,
                output,
            } => {
                self.gource(*mode, native_log.as_deref(), output.as_deref(), &mut summary)?;
            }
            Command::All { native_log } => {
                let client = self.client("all")?;
                self.fetch(&client, &mut summary).await?;
                self.link(&client, &mut summary).await?;
                self.metrics(&mut summary)?;
                self.gource(GourceMode::Simple, None, None, &mut summary)?;
                self.gource(GourceMode::Detailed, None, None, &mut summary)?;

                let native_log = native_log
                    .clone()
                    .unwrap_or_else(|| self.config.default_native_log());
                if native_log.exists() {
                    self.gource(
                        GourceMode::Merged,
                        Some(native_log.as_path()),
                        None,
                        &mut summary,
                    )?;
                } else {
                    info!(path = %native_log.display(), "No native log, skipping merge");
                }
            }
        }

        Ok(summary)
    }

    fn client(&self, pass: &'static str) -> Result<GitHubClient, RunnerError> {
        let token = self
            .config
            .token()
            .ok_or(RunnerError::MissingToken { pass })?;
        Ok(GitHubClient::new(token)?)
    }

    /// Downloads the issue listing and saves it.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Store`] if the listing cannot be saved.
    pub async fn fetch(
        &self,
        api: &dyn IssueApi,
        summary: &mut RunSummary,
    ) -> Result<(), RunnerError> {
        let issues = fetch_issues(api, self.config.repo(), &self.config.pacing()).await;
        let path = self.store.save_raw_issues(&issues)?;
        info!(path = %path.display(), count = issues.len(), "Saved issues");
        summary.issues_fetched = Some(issues.len());
        Ok(())
    }

    /// Links the saved issue listing and saves the result.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Store`] if the result cannot be saved.
    pub async fn link(
        &self,
        api: &dyn IssueApi,
        summary: &mut RunSummary,
    ) -> Result<(), RunnerError> {
        let Some(raw) = self.load_or_record(self.store.load_raw_issues(), summary)? else {
            return Ok(());
        };

        let options = LinkOptions {
            pacing: self.config.pacing(),
            include_open: self.config.include_open(),
        };
        let (issues, link_summary) = link_issues(api, self.config.repo(), &raw, &options).await;
        let path = self.store.save_linked_issues(&issues)?;
        info!(path = %path.display(), count = issues.len(), "Saved linked issues");
        summary.link = Some(link_summary);
        Ok(())
    }

    /// Computes the traceability report over the linked issues.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Store`] if the linked issues are unreadable.
    pub fn metrics(&self, summary: &mut RunSummary) -> Result<(), RunnerError> {
        let Some(issues) = self.linked_issues(summary)? else {
            return Ok(());
        };

        match TraceabilityReport::compute(&issues) {
            Some(report) => {
                info!(
                    closed = report.closed,
                    linked = report.linked,
                    rate = report.rate(),
                    "Computed TRR"
                );
                summary.traceability = Some(report);
            }
            None => warn!("No closed issues to measure"),
        }
        Ok(())
    }

    /// Writes one Gource log.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Store`] if an input is unreadable or the log
    /// cannot be written.
    pub fn gource(
        &self,
        mode: GourceMode,
        native_log: Option<&Path>,
        output: Option<&Path>,
        summary: &mut RunSummary,
    ) -> Result<(), RunnerError> {
        let Some(issues) = self.linked_issues(summary)? else {
            return Ok(());
        };

        let entries = match mode {
            GourceMode::Simple => simple_log(&issues),
            GourceMode::Detailed => {
                let log = detailed_log(&issues);
                info!(
                    issues = log.issues,
                    file_nodes = log.file_nodes,
                    "Built detailed log"
                );
                log.entries
            }
            GourceMode::Merged => {
                let path = native_log
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.config.default_native_log());
                let Some(native) = self.load_or_record(load_native_log(&path), summary)? else {
                    error!(path = %path.display(), "Native log not found, merge aborted");
                    return Ok(());
                };
                let merged = merge_logs(native, &issues);
                info!(
                    native = merged.native_entries,
                    issue_entries = merged.issue_entries,
                    issues = merged.issues,
                    "Merged logs"
                );
                merged.entries
            }
        };

        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output(mode));
        self.write(&path, &entries, summary)
    }

    fn default_output(&self, mode: GourceMode) -> PathBuf {
        match mode {
            GourceMode::Simple => self.store.simple_log_path(),
            GourceMode::Detailed => self.store.detailed_log_path(),
            GourceMode::Merged => self.store.merged_log_path(),
        }
    }

    fn write(
        &self,
        path: &Path,
        entries: &[LogEntry],
        summary: &mut RunSummary,
    ) -> Result<(), RunnerError> {
        save_log(path, entries)?;
        let counts = ActionCounts::of(entries);
        info!(path = %path.display(), counts = %counts, "Log written");
        summary.record_log(path.display().to_string(), counts);
        Ok(())
    }

    fn linked_issues(&self, summary: &mut RunSummary) -> Result<Option<Vec<Issue>>, RunnerError> {
        self.load_or_record(self.store.load_linked_issues(), summary)
    }

    /// Turns a missing input into a summary entry instead of an error.
    fn load_or_record<T>(
        &self,
        loaded: Result<T, StoreError>,
        summary: &mut RunSummary,
    ) -> Result<Option<T>, RunnerError> {
        match loaded {
            Ok(value) => Ok(Some(value)),
            Err(StoreError::Missing { path }) => {
                error!(path = %path, "Input file not found");
                summary.record_missing(path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
