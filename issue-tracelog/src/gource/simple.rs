//! Simple mode: one virtual file per issue, grouped by category.

use super::{parse_timestamp, sort_entries, Action, IssueCategory, LogEntry};
use crate::model::Issue;

/// Offset applied to a commit without a parseable date.
const COMMIT_FALLBACK_SECS: i64 = 1;

/// Offset at which files of an issue without commits are touched.
const FILES_WITHOUT_COMMITS_SECS: i64 = 60;

/// Builds the simple-mode log for `issues`, sorted by timestamp.
///
/// Per issue:
/// - `A` on `/issues/<category>/issue_<id>.issue` at creation
/// - for each related commit, `M` on every file it touched and on the
///   issue path, at the commit date (creation + 1 s if the date is unusable)
/// - without related commits, `M` on each real affected file at creation + 60 s
/// - `D` on the issue path at close time, if closed
#[must_use]
pub fn simple_log(issues: &[Issue]) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    for issue in issues {
        push_issue(issue, &mut entries);
    }
    sort_entries(&mut entries);
    entries
}

fn push_issue(issue: &Issue, entries: &mut Vec<LogEntry>) {
    let issue_path = IssueCategory::from_labels(&issue.labels).issue_path(issue.id);
    let start = parse_timestamp(&issue.start_time);

    if let Some(start) = start {
        entries.push(LogEntry::new(start, &issue.user, Action::Add, &issue_path));
    }

    for commit in &issue.related_commits {
        let Some(timestamp) =
            parse_timestamp(&commit.date).or(start.map(|start| start + COMMIT_FALLBACK_SECS))
        else {
            continue;
        };
        let author = if commit.author.is_empty() {
            &issue.user
        } else {
            &commit.author
        };

        for file in &commit.files {
            entries.push(LogEntry::new(
                timestamp,
                author,
                Action::Modify,
                absolute_path(file),
            ));
        }
        entries.push(LogEntry::new(timestamp, author, Action::Modify, &issue_path));
    }

    if issue.related_commits.is_empty() {
        if let Some(start) = start {
            let timestamp = start + FILES_WITHOUT_COMMITS_SECS;
            for file in issue.real_files() {
                entries.push(LogEntry::new(
                    timestamp,
                    &issue.user,
                    Action::Modify,
                    absolute_path(file),
                ));
            }
        }
    }

    if issue.is_closed() {
        if let Some(end) = issue.end_time.as_deref().and_then(parse_timestamp) {
            entries.push(LogEntry::new(end, &issue.user, Action::Delete, issue_path));
        }
    }
}

/// Prefixes `/` to repository-relative paths.
pub(crate) fn absolute_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
