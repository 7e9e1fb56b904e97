//! Fixed delays inserted after high-volume calls.

use serde::Deserialize;
use std::time::Duration;

/// Delays applied after each kind of API call to stay under the rate limit.
///
/// Loaded from the `[pacing]` table of the settings file; values are
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Pacing {
    /// After each page of the issue listing.
    pub issues_page_ms: u64,

    /// After each issue timeline.
    pub timeline_ms: u64,

    /// After each commit detail request.
    pub commit_ms: u64,

    /// After fetching a pull request's files and commits.
    pub pull_request_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            issues_page_ms: 500,
            timeline_ms: 300,
            commit_ms: 100,
            pull_request_ms: 200,
        }
    }
}

impl Pacing {
    /// No delays at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            issues_page_ms: 0,
            timeline_ms: 0,
            commit_ms: 0,
            pull_request_ms: 0,
        }
    }

    pub async fn after_issues_page(&self) {
        pause(self.issues_page_ms).await;
    }

    pub async fn after_timeline(&self) {
        pause(self.timeline_ms).await;
    }

    pub async fn after_commit(&self) {
        pause(self.commit_ms).await;
    }

    pub async fn after_pull_request(&self) {
        pause(self.pull_request_ms).await;
    }
}

async fn pause(millis: u64) {
    if millis > 0 {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}
