//! Enriched issue records.

use super::commit::CommitSet;
use super::pull_request::PullRequestSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Directory prefix of synthesized placeholder paths.
pub const PLACEHOLDER_DIR: &str = "discussions/";

/// How an issue was resolved, derived from its timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionMethod {
    /// No commit or pull request event matched.
    #[default]
    #[serde(rename = "manual")]
    Manual,

    /// Closed by, or referenced from, a commit.
    #[serde(rename = "direct_commit")]
    DirectCommit,

    /// Cross-referenced by a pull request.
    #[serde(rename = "PR_linked")]
    PrLinked,
}

impl ResolutionMethod {
    /// Returns the persisted name of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::DirectCommit => "direct_commit",
            Self::PrLinked => "PR_linked",
        }
    }
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    /// Parses the state string used by the GitHub API.
    ///
    /// Anything other than `"closed"` is treated as open.
    #[must_use]
    pub fn from_api(state: &str) -> Self {
        if state.eq_ignore_ascii_case("closed") {
            Self::Closed
        } else {
            Self::Open
        }
    }
}

/// Relation counts stored alongside each issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStats {
    pub total_commits: usize,
    pub total_files: usize,
    pub total_prs: usize,
}

/// An issue enriched with the commits, pull requests and files linked to it.
///
/// Produced by the linker and persisted to `<repo>_issues_commits.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number.
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub body: Option<String>,

    /// Login of the issue author.
    #[serde(default = "unknown_user")]
    pub user: String,

    /// Creation time, ISO-8601 as returned by the API.
    #[serde(default)]
    pub start_time: String,

    /// Close time, ISO-8601, absent while open.
    #[serde(default)]
    pub end_time: Option<String>,

    #[serde(default)]
    pub state: IssueState,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub resolution_type: ResolutionMethod,

    #[serde(default)]
    pub related_prs: PullRequestSet,

    #[serde(default)]
    pub related_commits: CommitSet,

    #[serde(default)]
    pub affected_files: BTreeSet<String>,

    #[serde(default)]
    pub stats: IssueStats,
}

fn unknown_user() -> String {
    "unknown".to_string()
}

impl Issue {
    /// Returns true if the issue is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }

    /// Returns true if at least one commit or pull request is linked.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        !self.related_commits.is_empty() || !self.related_prs.is_empty()
    }

    /// Affected files excluding the synthesized placeholder.
    pub fn real_files(&self) -> impl Iterator<Item = &str> {
        self.affected_files
            .iter()
            .map(String::as_str)
            .filter(|path| !is_placeholder(path))
    }

    /// Inserts the placeholder path when no files were discovered and
    /// recomputes [`IssueStats`].
    pub fn finalize(&mut self) {
        if self.affected_files.is_empty() {
            self.affected_files.insert(placeholder_path(self.id));
        }
        self.stats = IssueStats {
            total_commits: self.related_commits.len(),
            total_files: self.affected_files.len(),
            total_prs: self.related_prs.len(),
        };
    }
}

/// Placeholder path that keeps a file-less issue representable in Gource.
#[must_use]
pub fn placeholder_path(issue_id: u64) -> String {
    format!("{PLACEHOLDER_DIR}issue_{issue_id}.txt")
}

/// Returns true for synthesized placeholder paths.
#[must_use]
pub fn is_placeholder(path: &str) -> bool {
    path.starts_with(PLACEHOLDER_DIR)
}
