//! Run summary types.

use super::result::LinkOutcome;
use crate::gource::ActionCounts;
use crate::metrics::TraceabilityReport;
use crate::model::Issue;

/// Counters for one linking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSummary {
    /// Number of issues processed.
    pub processed: usize,

    /// Number of issues with at least one related commit.
    pub with_commits: usize,

    /// Number of issues with at least one related pull request.
    pub with_prs: usize,

    /// Number of open issues passed through without a timeline scan.
    pub not_scanned: usize,

    /// Number of issues whose timeline could not be fetched.
    pub timeline_failures: usize,
}

impl LinkSummary {
    /// Updates the summary with a linked issue.
    pub fn record(&mut self, issue: &Issue, outcome: &LinkOutcome) {
        self.processed += 1;
        if !issue.related_commits.is_empty() {
            self.with_commits += 1;
        }
        if !issue.related_prs.is_empty() {
            self.with_prs += 1;
        }
        match outcome {
            LinkOutcome::NotScanned => self.not_scanned += 1,
            LinkOutcome::TimelineFailed { .. } => self.timeline_failures += 1,
            LinkOutcome::Linked | LinkOutcome::Unlinked => {}
        }
    }
}

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of issues downloaded by the fetch pass.
    pub issues_fetched: Option<usize>,

    /// Linking counters, if the link pass ran.
    pub link: Option<LinkSummary>,

    /// Traceability report, if there were closed issues to measure.
    pub traceability: Option<TraceabilityReport>,

    /// Entry counts per written log file.
    pub logs: Vec<(String, ActionCounts)>,

    /// Inputs that were missing, so a pass produced nothing.
    pub missing_inputs: Vec<String>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a log file that was written.
    pub fn record_log(&mut self, path: impl Into<String>, counts: ActionCounts) {
        self.logs.push((path.into(), counts));
    }

    /// Records a missing input.
    pub fn record_missing(&mut self, path: impl Into<String>) {
        self.missing_inputs.push(path.into());
    }

    /// Returns true if any pass was skipped for lack of input.
    #[must_use]
    pub fn has_missing_inputs(&self) -> bool {
        !self.missing_inputs.is_empty()
    }
}
