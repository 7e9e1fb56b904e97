//! Wire types for the subset of the GitHub REST API used here.
//!
//! Every field is optional or defaulted; the API omits keys freely and a
//! missing field must never fail a whole page.

use crate::model::Commit;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An item from the repository issue listing.
///
/// Unknown fields are kept in `extra` so the persisted raw dump stays a
/// faithful copy of the API payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
    pub number: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub user: Option<RawUser>,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub closed_at: Option<String>,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub labels: Vec<RawLabel>,

    /// Present only when the item is a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawIssue {
    /// Returns true if the listing item is a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Login of the author, `"unknown"` if absent.
    #[must_use]
    pub fn author(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.login.as_str())
            .filter(|login| !login.is_empty())
            .unwrap_or("unknown")
    }

    /// Label names.
    #[must_use]
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|label| label.name.clone()).collect()
    }
}

/// A GitHub user reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub login: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An issue label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLabel {
    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of an issue timeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineEvent {
    /// Event type, e.g. `closed`, `cross-referenced`, `referenced`.
    #[serde(default)]
    pub event: String,

    /// Commit that caused the event, if any.
    #[serde(default)]
    pub commit_id: Option<String>,

    /// Source of a cross-reference.
    #[serde(default)]
    pub source: Option<EventSource>,
}

/// Source of a `cross-referenced` event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventSource {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub issue: Option<SourceIssue>,
}

/// The issue (or pull request) that made a cross-reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceIssue {
    #[serde(default)]
    pub number: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub html_url: String,

    #[serde(default)]
    pub state: String,

    /// Present only when the source is a pull request.
    #[serde(default)]
    pub pull_request: Option<PullRequestLink>,
}

/// Link block attached to issues that are pull requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestLink {
    /// API URL of the pull request.
    #[serde(default)]
    pub url: Option<String>,
}

/// A commit as returned by the commit detail and PR commit endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    pub sha: String,

    #[serde(default)]
    pub commit: CommitPayload,

    /// Only populated by the commit detail endpoint.
    #[serde(default)]
    pub files: Vec<ChangedFile>,
}

/// Git-level commit data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitPayload {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub author: Option<GitSignature>,
}

/// Author or committer signature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitSignature {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub date: String,
}

/// A file changed by a commit or pull request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangedFile {
    pub filename: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub additions: u64,

    #[serde(default)]
    pub deletions: u64,
}

impl From<CommitDetail> for Commit {
    fn from(detail: CommitDetail) -> Self {
        let (author, date) = detail
            .commit
            .author
            .map(|signature| (signature.name, signature.date))
            .unwrap_or_default();
        Self {
            sha: detail.sha,
            message: detail.commit.message,
            author,
            date,
            files: detail.files.into_iter().map(|file| file.filename).collect(),
        }
    }
}
