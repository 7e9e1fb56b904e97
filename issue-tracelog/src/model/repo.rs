//! Repository coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner and name of the repository being analysed.
///
/// Passed explicitly to every operation that talks to the API or names an
/// output file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Creates a new repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// File name of the raw issue dump.
    #[must_use]
    pub fn raw_issues_file(&self) -> String {
        format!("{}_issues.json", self.name)
    }

    /// File name of the linked issue corpus.
    #[must_use]
    pub fn linked_issues_file(&self) -> String {
        format!("{}_issues_commits.json", self.name)
    }

    /// File name of the simple-mode Gource log.
    #[must_use]
    pub fn simple_log_file(&self) -> String {
        format!("{}_gource.log", self.name)
    }

    /// File name of the detailed-mode Gource log.
    #[must_use]
    pub fn detailed_log_file(&self) -> String {
        format!("{}_gource_detailed.log", self.name)
    }

    /// File name of the merged Gource log.
    #[must_use]
    pub fn merged_log_file(&self) -> String {
        format!("{}_merged.log", self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
