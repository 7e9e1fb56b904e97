//! Pull requests referenced from an issue timeline.

use super::keyed::{Keyed, KeyedList};
use serde::{Deserialize, Serialize};

/// Summary of a pull request that cross-referenced an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// Pull request number.
    pub number: u64,

    /// Pull request title.
    #[serde(default)]
    pub title: String,

    /// HTML URL of the pull request.
    #[serde(default)]
    pub url: String,

    /// State at the time of linking ("open" or "closed").
    #[serde(default)]
    pub state: String,
}

impl Keyed for PullRequestSummary {
    type Key = u64;

    fn key(&self) -> u64 {
        self.number
    }
}

/// Pull requests deduplicated by number.
pub type PullRequestSet = KeyedList<PullRequestSummary>;
