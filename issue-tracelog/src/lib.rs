#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod fetch;
pub mod github;
pub mod gource;
pub mod linker;
pub mod metrics;
pub mod model;
pub mod rate_limit;
pub mod runner;
pub mod store;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{load_token, resolve_repo, ConfigError, Settings, DEFAULT_TOKEN_FILE};
pub use fetch::fetch_issues;
pub use github::{ApiError, GitHubClient, IssueApi, RawIssue};
pub use gource::{
    detailed_log, merge_logs, read_native_log, simple_log, write_log, Action, ActionCounts,
    LogEntry,
};
pub use linker::{link_issue, link_issues, LinkOptions};
pub use metrics::TraceabilityReport;
pub use model::{Commit, Issue, IssueState, PullRequestSummary, RepoRef, ResolutionMethod};
pub use rate_limit::{
    check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, Pacing, RateLimitInfo,
};
pub use runner::{Command, GourceMode, Runner, RunnerConfig, RunnerError};
pub use store::{Store, StoreError};
pub use summary::{LinkOutcome, LinkSummary, RunSummary};
