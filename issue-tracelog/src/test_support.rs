//! In-memory [`IssueApi`] and payload builders for unit tests.

use crate::github::{
    ApiError, ChangedFile, CommitDetail, CommitPayload, EventSource, GitSignature, IssueApi,
    PullRequestLink, RawIssue, SourceIssue, TimelineEvent,
};
use crate::model::RepoRef;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned GitHub responses keyed by request.
#[derive(Default)]
pub(crate) struct FakeApi {
    issue_pages: Vec<Vec<RawIssue>>,
    failing_pages: HashSet<u32>,
    timelines: HashMap<u64, Vec<TimelineEvent>>,
    failing_timelines: HashSet<u64>,
    commits: HashMap<String, CommitDetail>,
    pr_files: HashMap<String, Vec<ChangedFile>>,
    pr_commits: HashMap<String, Vec<CommitDetail>>,
    issue_page_requests: AtomicUsize,
    timeline_requests: AtomicUsize,
    commit_requests: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn repo() -> RepoRef {
        RepoRef::new("acaudwell", "Gource")
    }

    pub(crate) fn with_issue_page(mut self, issues: Vec<RawIssue>) -> Self {
        self.issue_pages.push(issues);
        self
    }

    pub(crate) fn failing_issue_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    pub(crate) fn with_timeline(mut self, issue: u64, events: Vec<TimelineEvent>) -> Self {
        self.timelines.insert(issue, events);
        self
    }

    pub(crate) fn failing_timeline(mut self, issue: u64) -> Self {
        self.failing_timelines.insert(issue);
        self
    }

    pub(crate) fn with_commit(mut self, detail: CommitDetail) -> Self {
        self.commits.insert(detail.sha.clone(), detail);
        self
    }

    pub(crate) fn with_pr_files(mut self, pr_url: &str, files: &[&str]) -> Self {
        let files = files
            .iter()
            .map(|name| ChangedFile {
                filename: (*name).to_string(),
                ..ChangedFile::default()
            })
            .collect();
        self.pr_files.insert(pr_url.to_string(), files);
        self
    }

    pub(crate) fn with_pr_commits(mut self, pr_url: &str, commits: Vec<CommitDetail>) -> Self {
        self.pr_commits.insert(pr_url.to_string(), commits);
        self
    }

    pub(crate) fn issue_page_requests(&self) -> usize {
        self.issue_page_requests.load(Ordering::SeqCst)
    }

    pub(crate) fn timeline_requests(&self) -> usize {
        self.timeline_requests.load(Ordering::SeqCst)
    }

    pub(crate) fn commit_requests(&self) -> usize {
        self.commit_requests.load(Ordering::SeqCst)
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::InvalidUrl {
        url: what.to_string(),
        source: url::ParseError::EmptyHost,
    }
}

#[async_trait]
impl IssueApi for FakeApi {
    async fn list_issues(&self, _repo: &RepoRef, page: u32) -> Result<Vec<RawIssue>, ApiError> {
        self.issue_page_requests.fetch_add(1, Ordering::SeqCst);
        if self.failing_pages.contains(&page) {
            return Err(not_found(&format!("issues?page={page}")));
        }
        let index = page.saturating_sub(1) as usize;
        Ok(self.issue_pages.get(index).cloned().unwrap_or_default())
    }

    async fn timeline(&self, _repo: &RepoRef, issue: u64) -> Result<Vec<TimelineEvent>, ApiError> {
        self.timeline_requests.fetch_add(1, Ordering::SeqCst);
        if self.failing_timelines.contains(&issue) {
            return Err(not_found(&format!("issues/{issue}/timeline")));
        }
        Ok(self.timelines.get(&issue).cloned().unwrap_or_default())
    }

    async fn commit(&self, _repo: &RepoRef, sha: &str) -> Result<CommitDetail, ApiError> {
        self.commit_requests.fetch_add(1, Ordering::SeqCst);
        self.commits
            .get(sha)
            .cloned()
            .ok_or_else(|| not_found(&format!("commits/{sha}")))
    }

    async fn pull_request_files(&self, pr_url: &str) -> Result<Vec<ChangedFile>, ApiError> {
        self.pr_files
            .get(pr_url)
            .cloned()
            .ok_or_else(|| not_found(pr_url))
    }

    async fn pull_request_commits(&self, pr_url: &str) -> Result<Vec<CommitDetail>, ApiError> {
        self.pr_commits
            .get(pr_url)
            .cloned()
            .ok_or_else(|| not_found(pr_url))
    }
}

/// A listing item created on 2024-01-01, closed a day later when `state`
/// is `closed`.
pub(crate) fn raw_issue(number: u64, state: &str) -> RawIssue {
    serde_json::from_value(serde_json::json!({
        "number": number,
        "title": format!("Issue {number}"),
        "state": state,
        "user": {"login": "reporter"},
        "created_at": "2024-01-01T00:00:00Z",
        "closed_at": (state == "closed").then_some("2024-01-02T00:00:00Z"),
    }))
    .unwrap()
}

pub(crate) fn closed_event(sha: &str) -> TimelineEvent {
    TimelineEvent {
        event: "closed".to_string(),
        commit_id: Some(sha.to_string()),
        source: None,
    }
}

pub(crate) fn referenced_event(sha: &str) -> TimelineEvent {
    TimelineEvent {
        event: "referenced".to_string(),
        commit_id: Some(sha.to_string()),
        source: None,
    }
}

pub(crate) fn cross_reference_event(number: u64, pr_url: &str) -> TimelineEvent {
    TimelineEvent {
        event: "cross-referenced".to_string(),
        commit_id: None,
        source: Some(EventSource {
            kind: "issue".to_string(),
            issue: Some(SourceIssue {
                number,
                title: format!("PR {number}"),
                html_url: format!("https://github.com/acaudwell/Gource/pull/{number}"),
                state: "closed".to_string(),
                pull_request: Some(PullRequestLink {
                    url: Some(pr_url.to_string()),
                }),
            }),
        }),
    }
}

pub(crate) fn commit_detail(sha: &str, date: &str, files: &[&str]) -> CommitDetail {
    CommitDetail {
        sha: sha.to_string(),
        commit: CommitPayload {
            message: format!("commit {sha}"),
            author: Some(GitSignature {
                name: "dev".to_string(),
                date: date.to_string(),
            }),
        },
        files: files
            .iter()
            .map(|name| ChangedFile {
                filename: (*name).to_string(),
                ..ChangedFile::default()
            })
            .collect(),
    }
}
