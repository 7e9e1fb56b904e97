//! Per-issue linking results.

/// How linking a single issue went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// At least one commit or pull request was linked.
    Linked,

    /// The timeline was read but nothing could be linked.
    Unlinked,

    /// The issue is open and its timeline was not read.
    NotScanned,

    /// The timeline could not be fetched.
    TimelineFailed {
        /// Error message.
        error: String,
    },
}
