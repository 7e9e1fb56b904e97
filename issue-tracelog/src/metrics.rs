//! Traceability Recovery Rate.
//!
//! TRR is the share of closed issues that have at least one linked commit
//! or pull request.

use crate::model::Issue;
use std::fmt;

/// TRR with its breakdown by kind of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceabilityReport {
    /// Closed issues considered.
    pub closed: usize,

    /// Closed issues with at least one commit or pull request.
    pub linked: usize,

    /// Linked issues with commits but no pull requests.
    pub commits_only: usize,

    /// Linked issues with pull requests but no commits.
    pub prs_only: usize,

    /// Linked issues with both.
    pub both: usize,
}

impl TraceabilityReport {
    /// Computes the report over the closed issues in `issues`.
    ///
    /// Returns `None` when there are no closed issues.
    #[must_use]
    pub fn compute(issues: &[Issue]) -> Option<Self> {
        let mut report = Self {
            closed: 0,
            linked: 0,
            commits_only: 0,
            prs_only: 0,
            both: 0,
        };

        for issue in issues.iter().filter(|issue| issue.is_closed()) {
            report.closed += 1;
            let has_commits = !issue.related_commits.is_empty();
            let has_prs = !issue.related_prs.is_empty();
            match (has_commits, has_prs) {
                (true, true) => report.both += 1,
                (true, false) => report.commits_only += 1,
                (false, true) => report.prs_only += 1,
                (false, false) => continue,
            }
            report.linked += 1;
        }

        (report.closed > 0).then_some(report)
    }

    /// Percentage of closed issues that are linked, in `[0, 100]`.
    #[must_use]
    pub fn rate(&self) -> f64 {
        if self.closed == 0 {
            return 0.0;
        }
        100.0 * self.linked as f64 / self.closed as f64
    }
}

impl fmt::Display for TraceabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traceability Recovery Rate (TRR)")?;
        writeln!(f, "  Closed issues: {}", self.closed)?;
        writeln!(f, "  Linked issues: {}", self.linked)?;
        writeln!(f, "  TRR: {:.2}%", self.rate())?;
        writeln!(f, "  Breakdown:")?;
        writeln!(f, "    Commits only: {}", self.commits_only)?;
        writeln!(f, "    PRs only: {}", self.prs_only)?;
        write!(f, "    Commits and PRs: {}", self.both)
    }
}
