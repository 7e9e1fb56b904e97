//! Gource custom-log generation.
//!
//! Three renderings of the linked issue corpus:
//! - [`simple_log`] - issues as virtual files under `/issues/<category>/`
//! - [`detailed_log`] - PR-linked issues grouped under the files they touched
//! - [`merge_logs`] - detailed entries interleaved with a native VCS log
//!
//! Every rendering is sorted by timestamp; ties keep insertion order.

mod category;
mod color;
mod detailed;
mod entry;
mod error;
mod merge;
mod simple;
mod time;

pub use category::IssueCategory;
pub use color::{color_for_path, Color};
pub use detailed::{detailed_log, DetailedLog};
pub use entry::{Action, LogEntry};
pub use error::LogParseError;
pub use merge::{merge_logs, read_native_log, MergedLog};
pub use simple::simple_log;
pub use time::parse_timestamp;

use std::fmt;
use std::io::{self, Write};

/// Stable sort by timestamp.
pub fn sort_entries(entries: &mut [LogEntry]) {
    entries.sort_by_key(|entry| entry.timestamp);
}

/// Writes one newline-terminated line per entry.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_log<W: Write>(mut writer: W, entries: &[LogEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(writer, "{entry}")?;
    }
    writer.flush()
}

/// Entry counts per action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionCounts {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
}

impl ActionCounts {
    /// Counts the actions in `entries`.
    #[must_use]
    pub fn of(entries: &[LogEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut counts, entry| {
            match entry.action {
                Action::Add => counts.added += 1,
                Action::Modify => counts.modified += 1,
                Action::Delete => counts.deleted += 1,
            }
            counts
        })
    }

    /// Total number of entries.
    #[must_use]
    pub fn total(&self) -> usize {
        self.added + self.modified + self.deleted
    }
}

impl fmt::Display for ActionCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries ({} added, {} modified, {} deleted)",
            self.total(),
            self.added,
            self.modified,
            self.deleted
        )
    }
}
