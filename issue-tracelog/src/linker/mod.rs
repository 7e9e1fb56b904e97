//! Timeline-based traceability linking.
//!
//! For each closed issue the linker reads the issue timeline and collects
//! the commits, pull requests and files that resolved it:
//!
//! 1. `closed` with a commit: the closing commit and its files
//! 2. `cross-referenced` from a pull request: the PR, its files and commits
//! 3. `referenced` with a commit: the referencing commit and its files
//!
//! Auxiliary fetches that fail are skipped; the issue keeps whatever else
//! was found.

mod classify;

pub use classify::{classify, LinkEvent};

use crate::github::{IssueApi, RawIssue};
use crate::model::{
    short_sha, Commit, Issue, IssueState, IssueStats, PullRequestSummary, RepoRef,
    ResolutionMethod,
};
use crate::rate_limit::Pacing;
use crate::summary::{LinkOutcome, LinkSummary};
use std::collections::BTreeSet;
use tracing::{debug, info, info_span, warn, Instrument};

/// Options for a linking pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkOptions {
    /// Delays between API calls.
    pub pacing: Pacing,

    /// Also scan the timelines of open issues.
    pub include_open: bool,
}

/// An issue after linking, with how the linking went.
#[derive(Debug, Clone)]
pub struct LinkedIssue {
    pub issue: Issue,
    pub outcome: LinkOutcome,
}

/// Links every issue in `raw_issues`, in order.
pub async fn link_issues(
    api: &dyn IssueApi,
    repo: &RepoRef,
    raw_issues: &[RawIssue],
    options: &LinkOptions,
) -> (Vec<Issue>, LinkSummary) {
    info!(repo = %repo, count = raw_issues.len(), "Linking issues");

    let mut summary = LinkSummary::default();
    let mut issues = Vec::with_capacity(raw_issues.len());

    for (index, raw) in raw_issues.iter().enumerate() {
        debug!(
            index = index + 1,
            total = raw_issues.len(),
            title = %raw.title,
            "Processing issue"
        );
        let linked = link_issue(api, repo, raw, options).await;
        summary.record(&linked.issue, &linked.outcome);
        issues.push(linked.issue);
    }

    info!(
        processed = summary.processed,
        with_commits = summary.with_commits,
        with_prs = summary.with_prs,
        timeline_failures = summary.timeline_failures,
        "Linking complete"
    );
    (issues, summary)
}

/// Links a single issue.
///
/// Open issues are passed through with default relations unless
/// [`LinkOptions::include_open`] is set. A failed timeline fetch leaves the
/// issue unlinked with resolution `manual`.
pub async fn link_issue(
    api: &dyn IssueApi,
    repo: &RepoRef,
    raw: &RawIssue,
    options: &LinkOptions,
) -> LinkedIssue {
    let span = info_span!("link_issue", issue = raw.number);

    async {
        let mut issue = base_issue(raw);

        if !issue.is_closed() && !options.include_open {
            issue.finalize();
            return LinkedIssue {
                issue,
                outcome: LinkOutcome::NotScanned,
            };
        }

        let events = match api.timeline(repo, raw.number).await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "Failed to fetch timeline");
                issue.finalize();
                return LinkedIssue {
                    issue,
                    outcome: LinkOutcome::TimelineFailed {
                        error: e.to_string(),
                    },
                };
            }
        };
        options.pacing.after_timeline().await;

        let mut collector = Collector {
            api,
            repo,
            pacing: &options.pacing,
            issue: &mut issue,
        };
        for event in events.iter().filter_map(classify) {
            collector.apply(event).await;
        }

        issue.finalize();
        let outcome = if issue.is_linked() {
            info!(
                commits = issue.related_commits.len(),
                prs = issue.related_prs.len(),
                files = issue.affected_files.len(),
                resolution = %issue.resolution_type,
                "Issue linked"
            );
            LinkOutcome::Linked
        } else {
            debug!("No related commits");
            LinkOutcome::Unlinked
        };
        LinkedIssue { issue, outcome }
    }
    .instrument(span)
    .await
}

/// Builds an issue record with empty relations from the listing payload.
#[must_use]
pub fn base_issue(raw: &RawIssue) -> Issue {
    Issue {
        id: raw.number,
        title: raw.title.clone(),
        body: raw.body.clone(),
        user: raw.author().to_string(),
        start_time: raw.created_at.clone(),
        end_time: raw.closed_at.clone(),
        state: IssueState::from_api(&raw.state),
        labels: raw.label_names(),
        resolution_type: ResolutionMethod::Manual,
        related_prs: Default::default(),
        related_commits: Default::default(),
        affected_files: BTreeSet::new(),
        stats: IssueStats::default(),
    }
}

/// Accumulates the evidence of one issue's timeline.
struct Collector<'a> {
    api: &'a dyn IssueApi,
    repo: &'a RepoRef,
    pacing: &'a Pacing,
    issue: &'a mut Issue,
}

impl Collector<'_> {
    async fn apply(&mut self, event: LinkEvent) {
        match &event {
            LinkEvent::ClosedByCommit { sha } => {
                info!(sha = short_sha(sha), "Direct commit found");
                self.add_commit_by_sha(sha).await;
            }
            LinkEvent::CrossReferencedPr { summary, api_url } => {
                info!(pr = summary.number, "Pull request found");
                self.add_pull_request(summary, api_url).await;
            }
            LinkEvent::ReferencedCommit { sha } => {
                if !self.issue.related_commits.contains(sha) {
                    info!(sha = short_sha(sha), "Referenced commit found");
                    self.add_commit_by_sha(sha).await;
                }
            }
        }
        self.issue.resolution_type = event.resolve(self.issue.resolution_type);
    }

    async fn add_commit_by_sha(&mut self, sha: &str) {
        if self.issue.related_commits.contains(&sha.to_string()) {
            return;
        }

        match self.api.commit(self.repo, sha).await {
            Ok(detail) => self.add_commit(Commit::from(detail)),
            Err(e) => warn!(sha = short_sha(sha), error = %e, "Failed to fetch commit"),
        }
        self.pacing.after_commit().await;
    }

    async fn add_pull_request(&mut self, summary: &PullRequestSummary, api_url: &str) {
        match self.api.pull_request_files(api_url).await {
            Ok(files) => self
                .issue
                .affected_files
                .extend(files.into_iter().map(|file| file.filename)),
            Err(e) => warn!(pr = summary.number, error = %e, "Failed to fetch PR files"),
        }

        match self.api.pull_request_commits(api_url).await {
            Ok(commits) => {
                for detail in commits {
                    self.add_commit(Commit::from(detail));
                }
            }
            Err(e) => warn!(pr = summary.number, error = %e, "Failed to fetch PR commits"),
        }

        self.issue.related_prs.insert(summary.clone());
        self.pacing.after_pull_request().await;
    }

    fn add_commit(&mut self, commit: Commit) {
        self.issue
            .affected_files
            .extend(commit.files.iter().cloned());
        self.issue.related_commits.insert(commit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        closed_event, commit_detail, cross_reference_event, raw_issue, referenced_event, FakeApi,
    };

    fn options() -> LinkOptions {
        LinkOptions {
            pacing: Pacing::none(),
            include_open: false,
        }
    }

    #[tokio::test]
    async fn links_direct_commit() {
        let api = FakeApi::default()
            .with_timeline(10, vec![closed_event("abc1234")])
            .with_commit(commit_detail("abc1234", "2024-01-02T00:00:00Z", &["src/a.c"]));
        let mut raw = raw_issue(10, "closed");
        raw.labels = vec![crate::github::RawLabel {
            name: "bug".to_string(),
            extra: Default::default(),
        }];

        let linked = link_issue(&api, &FakeApi::repo(), &raw, &options()).await;

        assert_eq!(linked.outcome, LinkOutcome::Linked);
        let issue = linked.issue;
        assert_eq!(issue.resolution_type, ResolutionMethod::DirectCommit);
        assert_eq!(issue.related_commits.len(), 1);
        assert_eq!(
            issue.affected_files.iter().collect::<Vec<_>>(),
            vec!["src/a.c"]
        );
        assert_eq!(issue.labels, vec!["bug".to_string()]);
        assert_eq!(issue.stats.total_commits, 1);
    }

    #[tokio::test]
    async fn synthesizes_placeholder_for_issue_without_events() {
        let api = FakeApi::default().with_timeline(20, Vec::new());

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(20, "closed"), &options()).await;

        assert_eq!(linked.outcome, LinkOutcome::Unlinked);
        assert_eq!(linked.issue.resolution_type, ResolutionMethod::Manual);
        assert_eq!(
            linked.issue.affected_files.iter().collect::<Vec<_>>(),
            vec!["discussions/issue_20.txt"]
        );
    }

    #[tokio::test]
    async fn merges_pull_request_files_and_commits() {
        let pr_url = "https://api.github.com/repos/o/r/pulls/42";
        let api = FakeApi::default()
            .with_timeline(
                30,
                vec![
                    closed_event("aaa0001"),
                    cross_reference_event(42, pr_url),
                ],
            )
            .with_commit(commit_detail("aaa0001", "2024-01-02T00:00:00Z", &["src/a.c"]))
            .with_pr_files(pr_url, &["src/b.c", "src/a.c"])
            .with_pr_commits(
                pr_url,
                vec![
                    commit_detail("aaa0001", "2024-01-02T00:00:00Z", &[]),
                    commit_detail("bbb0002", "2024-01-03T00:00:00Z", &[]),
                ],
            );

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(30, "closed"), &options()).await;
        let issue = linked.issue;

        assert_eq!(issue.resolution_type, ResolutionMethod::PrLinked);
        let shas: Vec<_> = issue.related_commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, vec!["aaa0001", "bbb0002"]);
        assert_eq!(issue.related_prs.len(), 1);
        assert_eq!(
            issue.affected_files.iter().collect::<Vec<_>>(),
            vec!["src/a.c", "src/b.c"]
        );
    }

    #[tokio::test]
    async fn keeps_pull_request_commits_when_files_fail() {
        let pr_url = "https://api.github.com/repos/o/r/pulls/12";
        let api = FakeApi::default()
            .with_timeline(32, vec![cross_reference_event(12, pr_url)])
            .with_pr_commits(
                pr_url,
                vec![commit_detail("abc0012", "2024-01-02T00:00:00Z", &[])],
            );

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(32, "closed"), &options()).await;
        let issue = linked.issue;

        assert_eq!(issue.resolution_type, ResolutionMethod::PrLinked);
        assert_eq!(issue.related_prs.len(), 1);
        assert!(issue.related_commits.contains(&"abc0012".to_string()));
        assert_eq!(
            issue.affected_files.iter().collect::<Vec<_>>(),
            vec!["discussions/issue_32.txt"]
        );
    }

    #[tokio::test]
    async fn keeps_pull_request_files_when_commits_fail() {
        let pr_url = "https://api.github.com/repos/o/r/pulls/13";
        let api = FakeApi::default()
            .with_timeline(33, vec![cross_reference_event(13, pr_url)])
            .with_pr_files(pr_url, &["src/c.c"]);

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(33, "closed"), &options()).await;
        let issue = linked.issue;

        assert_eq!(linked.outcome, LinkOutcome::Linked);
        assert_eq!(issue.resolution_type, ResolutionMethod::PrLinked);
        assert_eq!(issue.related_prs.len(), 1);
        assert!(issue.related_commits.is_empty());
        assert_eq!(
            issue.affected_files.iter().collect::<Vec<_>>(),
            vec!["src/c.c"]
        );
    }

    #[tokio::test]
    async fn later_commit_close_overrides_pull_request() {
        let pr_url = "https://api.github.com/repos/o/r/pulls/8";
        let api = FakeApi::default()
            .with_timeline(
                31,
                vec![cross_reference_event(8, pr_url), closed_event("ccc0003")],
            )
            .with_commit(commit_detail("ccc0003", "2024-01-02T00:00:00Z", &[]))
            .with_pr_files(pr_url, &["a.c"])
            .with_pr_commits(pr_url, Vec::new());

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(31, "closed"), &options()).await;

        assert_eq!(linked.issue.resolution_type, ResolutionMethod::DirectCommit);
    }

    #[tokio::test]
    async fn referenced_commit_classifies_only_unclassified_issue() {
        let api = FakeApi::default()
            .with_timeline(40, vec![referenced_event("ddd0004")])
            .with_commit(commit_detail("ddd0004", "2024-01-02T00:00:00Z", &["x.c"]));

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(40, "closed"), &options()).await;

        assert_eq!(linked.issue.resolution_type, ResolutionMethod::DirectCommit);
        assert_eq!(linked.issue.related_commits.len(), 1);
    }

    #[tokio::test]
    async fn skips_commits_that_fail_to_fetch() {
        let api = FakeApi::default().with_timeline(50, vec![closed_event("eee0005")]);

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(50, "closed"), &options()).await;

        assert_eq!(linked.issue.resolution_type, ResolutionMethod::DirectCommit);
        assert!(linked.issue.related_commits.is_empty());
        assert_eq!(
            linked.issue.affected_files.iter().collect::<Vec<_>>(),
            vec!["discussions/issue_50.txt"]
        );
    }

    #[tokio::test]
    async fn does_not_refetch_known_commit() {
        let api = FakeApi::default()
            .with_timeline(
                60,
                vec![referenced_event("fff0006"), closed_event("fff0006")],
            )
            .with_commit(commit_detail("fff0006", "2024-01-02T00:00:00Z", &["y.c"]));

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(60, "closed"), &options()).await;

        assert_eq!(linked.issue.related_commits.len(), 1);
        assert_eq!(api.commit_requests(), 1);
    }

    #[tokio::test]
    async fn timeline_failure_leaves_issue_manual() {
        let api = FakeApi::default().failing_timeline(70);

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(70, "closed"), &options()).await;

        assert!(matches!(linked.outcome, LinkOutcome::TimelineFailed { .. }));
        assert_eq!(linked.issue.resolution_type, ResolutionMethod::Manual);
        assert!(!linked.issue.is_linked());
    }

    #[tokio::test]
    async fn open_issues_are_not_scanned_by_default() {
        let api = FakeApi::default().with_timeline(80, vec![closed_event("abc")]);

        let linked = link_issue(&api, &FakeApi::repo(), &raw_issue(80, "open"), &options()).await;

        assert_eq!(linked.outcome, LinkOutcome::NotScanned);
        assert_eq!(api.timeline_requests(), 0);

        let include_open = LinkOptions {
            include_open: true,
            ..options()
        };
        let linked =
            link_issue(&api, &FakeApi::repo(), &raw_issue(80, "open"), &include_open).await;
        assert_eq!(api.timeline_requests(), 1);
        assert_eq!(linked.issue.resolution_type, ResolutionMethod::DirectCommit);
    }

    #[tokio::test]
    async fn summarizes_pass() {
        let api = FakeApi::default()
            .with_timeline(1, vec![closed_event("abc1234")])
            .with_commit(commit_detail("abc1234", "2024-01-02T00:00:00Z", &["a.c"]))
            .with_timeline(2, Vec::new());
        let raws = vec![raw_issue(1, "closed"), raw_issue(2, "closed"), raw_issue(3, "open")];

        let (issues, summary) = link_issues(&api, &FakeApi::repo(), &raws, &options()).await;

        assert_eq!(issues.len(), 3);
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.with_commits, 1);
        assert_eq!(summary.not_scanned, 1);
    }
}
