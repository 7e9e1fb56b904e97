//! Issue listing.
//!
//! Walks the repository issue listing page by page and keeps only real
//! issues; pull requests share the listing and are dropped.

use crate::github::{IssueApi, RawIssue};
use crate::model::RepoRef;
use crate::rate_limit::Pacing;
use tracing::{debug, error, info, info_span, Instrument};

/// Fetches every issue of `repo`, excluding pull requests.
///
/// Pages are requested until an empty page comes back. A failed request
/// ends the walk; issues collected so far are returned.
pub async fn fetch_issues(api: &dyn IssueApi, repo: &RepoRef, pacing: &Pacing) -> Vec<RawIssue> {
    let span = info_span!("fetch_issues", repo = %repo);

    async {
        info!("Downloading issues");
        let mut issues = Vec::new();
        let mut page = 1;

        loop {
            debug!(page, "Requesting page");
            let items = match api.list_issues(repo, page).await {
                Ok(items) => items,
                Err(e) => {
                    error!(page, error = %e, "Failed to list issues, stopping");
                    break;
                }
            };

            if items.is_empty() {
                break;
            }

            let before = issues.len();
            issues.extend(items.into_iter().filter(|item| !item.is_pull_request()));
            info!(page, issues = issues.len() - before, "Fetched page");

            page += 1;
            pacing.after_issues_page().await;
        }

        info!(total = issues.len(), "Issue download complete");
        issues
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{raw_issue, FakeApi};

    #[tokio::test]
    async fn excludes_pull_requests_and_stops_on_empty_page() {
        let mut pr = raw_issue(3, "open");
        pr.pull_request = Some(serde_json::json!({"url": "https://api.github.com/pulls/3"}));

        let api = FakeApi::default()
            .with_issue_page(vec![raw_issue(5, "closed"), pr])
            .with_issue_page(vec![raw_issue(1, "open")]);

        let issues = fetch_issues(&api, &FakeApi::repo(), &Pacing::none()).await;

        let numbers: Vec<_> = issues.iter().map(|i| i.number).collect();
        assert_eq!(numbers, vec![5, 1]);
        assert_eq!(api.issue_page_requests(), 3);
    }

    #[tokio::test]
    async fn keeps_collected_pages_when_a_request_fails() {
        let api = FakeApi::default()
            .with_issue_page(vec![raw_issue(9, "open")])
            .failing_issue_page(2);

        let issues = fetch_issues(&api, &FakeApi::repo(), &Pacing::none()).await;

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].number, 9);
    }
}
