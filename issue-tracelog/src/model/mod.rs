//! Data model shared by every pass.
//!
//! - [`Issue`] - an issue enriched with its linked commits, PRs and files
//! - [`Commit`] and [`PullRequestSummary`] - the linked evidence
//! - [`KeyedList`] - insertion-ordered containers deduplicated by identifier
//! - [`RepoRef`] - the repository being analysed

mod commit;
mod issue;
mod keyed;
mod pull_request;
mod repo;

pub use commit::{short_sha, Commit, CommitSet};
pub use issue::{
    is_placeholder, placeholder_path, Issue, IssueState, IssueStats, ResolutionMethod,
    PLACEHOLDER_DIR,
};
pub use keyed::{Keyed, KeyedList};
pub use pull_request::{PullRequestSet, PullRequestSummary};
pub use repo::RepoRef;
