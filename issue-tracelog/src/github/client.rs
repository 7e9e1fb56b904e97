//! `Octocrab`-backed implementation of [`IssueApi`].

use super::{ApiError, ChangedFile, CommitDetail, IssueApi, RawIssue, TimelineEvent};
use crate::model::RepoRef;
use crate::rate_limit::ensure_core_rate_limit;
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Results per page for every listing endpoint.
pub const PER_PAGE: u8 = 100;

/// Upper bound on pages followed for a single listing.
const MAX_PAGES: u32 = 100;

/// Query parameters for the issue listing.
#[derive(Serialize)]
struct IssueListParams {
    state: &'static str,
    sort: &'static str,
    direction: &'static str,
    per_page: u8,
    page: u32,
}

/// Query parameters for plain paginated listings.
#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

/// Authenticated GitHub client.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Builds a client authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(token: &str) -> Result<Self, octocrab::Error> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .build()?;
        Ok(Self { octocrab })
    }

    /// Follows `page=1, 2, ...` until a short page.
    async fn get_all_pages<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let params = PageParams {
                per_page: PER_PAGE,
                page,
            };
            let batch: Vec<T> = self.octocrab.get(route, Some(&params)).await?;
            let last = batch.len() < usize::from(PER_PAGE);
            items.extend(batch);
            if last {
                return Ok(items);
            }
        }

        warn!(route, max_pages = MAX_PAGES, "Stopped following pages");
        Ok(items)
    }
}

#[async_trait]
impl IssueApi for GitHubClient {
    async fn list_issues(&self, repo: &RepoRef, page: u32) -> Result<Vec<RawIssue>, ApiError> {
        let route = format!("/repos/{}/{}/issues", repo.owner, repo.name);
        let params = IssueListParams {
            state: "all",
            sort: "created",
            direction: "desc",
            per_page: PER_PAGE,
            page,
        };
        Ok(self.octocrab.get(route, Some(&params)).await?)
    }

    async fn timeline(&self, repo: &RepoRef, issue: u64) -> Result<Vec<TimelineEvent>, ApiError> {
        if let Err(e) = ensure_core_rate_limit(&self.octocrab).await {
            warn!(error = %e, "Failed to check rate limit, continuing");
        }

        let route = format!("/repos/{}/{}/issues/{issue}/timeline", repo.owner, repo.name);
        let raw: Vec<Value> = self.get_all_pages(&route).await?;
        Ok(raw.into_iter().filter_map(parse_timeline_event).collect())
    }

    async fn commit(&self, repo: &RepoRef, sha: &str) -> Result<CommitDetail, ApiError> {
        let route = format!("/repos/{}/{}/commits/{sha}", repo.owner, repo.name);
        Ok(self.octocrab.get(route, None::<&()>).await?)
    }

    async fn pull_request_files(&self, pr_url: &str) -> Result<Vec<ChangedFile>, ApiError> {
        let route = format!("{}/files", api_route(pr_url)?);
        self.get_all_pages(&route).await
    }

    async fn pull_request_commits(&self, pr_url: &str) -> Result<Vec<CommitDetail>, ApiError> {
        let route = format!("{}/commits", api_route(pr_url)?);
        self.get_all_pages(&route).await
    }
}

/// Converts one timeline item, skipping anything that is not an event object.
fn parse_timeline_event(value: Value) -> Option<TimelineEvent> {
    if !value.is_object() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(event) => Some(event),
        Err(e) => {
            debug!(error = %e, "Skipping unreadable timeline item");
            None
        }
    }
}

/// Turns an absolute API URL into a route relative to the API host.
fn api_route(api_url: &str) -> Result<String, ApiError> {
    let url = Url::parse(api_url).map_err(|source| ApiError::InvalidUrl {
        url: api_url.to_string(),
        source,
    })?;
    Ok(url.path().trim_end_matches('/').to_string())
}
