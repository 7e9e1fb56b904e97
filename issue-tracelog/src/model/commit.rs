//! Commits linked to an issue.

use super::keyed::{Keyed, KeyedList};
use serde::{Deserialize, Serialize};

/// A commit associated with an issue.
///
/// The same commit may be linked from several issues; each issue keeps its
/// own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit SHA.
    pub sha: String,

    /// Commit message.
    #[serde(default)]
    pub message: String,

    /// Author name as recorded in the commit.
    #[serde(default)]
    pub author: String,

    /// Author date in ISO-8601, empty when unknown.
    #[serde(default)]
    pub date: String,

    /// Paths touched by the commit.
    ///
    /// Empty for commits discovered through a pull request's commit listing,
    /// which does not include file details.
    #[serde(default)]
    pub files: Vec<String>,
}

impl Keyed for Commit {
    type Key = String;

    fn key(&self) -> String {
        self.sha.clone()
    }
}

/// Commits deduplicated by SHA.
pub type CommitSet = KeyedList<Commit>;

/// Returns the first seven characters of a SHA.
#[must_use]
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
