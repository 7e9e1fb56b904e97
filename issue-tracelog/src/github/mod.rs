//! Access to the GitHub REST API.
//!
//! The passes only see the [`IssueApi`] trait; [`GitHubClient`] implements
//! it on top of an authenticated `Octocrab` instance.

mod client;
mod error;
mod types;

pub use client::{GitHubClient, PER_PAGE};
pub use error::ApiError;
pub use types::{
    ChangedFile, CommitDetail, CommitPayload, EventSource, GitSignature, PullRequestLink,
    RawIssue, RawLabel, RawUser, SourceIssue, TimelineEvent,
};

use crate::model::RepoRef;
use async_trait::async_trait;

/// The API calls made by the fetch and link passes.
///
/// Every call is awaited sequentially by its caller. Implementations do not
/// retry.
#[async_trait]
pub trait IssueApi: Send + Sync {
    /// Lists one page of issues and pull requests (`state=all`, newest first).
    async fn list_issues(&self, repo: &RepoRef, page: u32) -> Result<Vec<RawIssue>, ApiError>;

    /// Fetches the complete timeline of an issue.
    async fn timeline(&self, repo: &RepoRef, issue: u64) -> Result<Vec<TimelineEvent>, ApiError>;

    /// Fetches a commit with its changed files.
    async fn commit(&self, repo: &RepoRef, sha: &str) -> Result<CommitDetail, ApiError>;

    /// Lists the files changed by a pull request, given its API URL.
    async fn pull_request_files(&self, pr_url: &str) -> Result<Vec<ChangedFile>, ApiError>;

    /// Lists the commits of a pull request, given its API URL.
    async fn pull_request_commits(&self, pr_url: &str) -> Result<Vec<CommitDetail>, ApiError>;
}
