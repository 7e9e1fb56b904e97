//! Detailed mode: issues grouped under the files they touched.
//!
//! ```text
//! /gource_settings.cpp/
//!   gource_settings.cpp    file node, Gource's extension color
//!   issue_33.issue         issue node, red
//!   issue_46.issue
//! ```

use super::{parse_timestamp, sort_entries, Action, Color, LogEntry};
use crate::model::{Issue, ResolutionMethod};
use std::collections::HashSet;

/// Entries of a detailed-mode log with counters.
#[derive(Debug, Clone, Default)]
pub struct DetailedLog {
    /// Entries sorted by timestamp.
    pub entries: Vec<LogEntry>,

    /// PR-linked issues that produced entries.
    pub issues: usize,

    /// Distinct file nodes added.
    pub file_nodes: usize,
}

/// Builds the detailed-mode log for `issues`.
///
/// Only PR-linked issues with at least one real affected file take part.
#[must_use]
pub fn detailed_log(issues: &[Issue]) -> DetailedLog {
    DetailedBuilder::default().build(issues)
}

/// Builds detailed-mode entries, skipping file nodes already known.
#[derive(Debug, Default)]
pub(crate) struct DetailedBuilder {
    file_nodes: HashSet<String>,
}

impl DetailedBuilder {
    /// Marks the file node for `path` as already present.
    pub(crate) fn mark_existing(&mut self, path: &str) {
        self.file_nodes.insert(file_node(base_name(path)));
    }

    pub(crate) fn build(mut self, issues: &[Issue]) -> DetailedLog {
        let mut log = DetailedLog::default();

        for issue in issues {
            if issue.resolution_type != ResolutionMethod::PrLinked {
                continue;
            }
            let files: Vec<&str> = issue.real_files().collect();
            if files.is_empty() {
                continue;
            }
            let Some(start) = parse_timestamp(&issue.start_time) else {
                continue;
            };
            let end = if issue.is_closed() {
                issue.end_time.as_deref().and_then(parse_timestamp)
            } else {
                None
            };

            log.issues += 1;
            let mut branches = HashSet::new();
            for file in files {
                let name = base_name(file);
                if !branches.insert(name) {
                    continue;
                }

                let node = file_node(name);
                if self.file_nodes.insert(node.clone()) {
                    log.entries
                        .push(LogEntry::new(start, &issue.user, Action::Add, node));
                    log.file_nodes += 1;
                }

                let issue_node = format!("/{name}/issue_{}.issue", issue.id);
                log.entries.push(
                    LogEntry::new(start + 1, &issue.user, Action::Add, &issue_node)
                        .with_color(Some(Color::ISSUE)),
                );
                if let Some(end) = end {
                    log.entries
                        .push(LogEntry::new(end, &issue.user, Action::Delete, issue_node));
                }
            }
        }

        sort_entries(&mut log.entries);
        log
    }
}

/// Last path component.
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File node of a branch: `/<name>/<name>`.
fn file_node(name: &str) -> String {
    format!("/{name}/{name}")
}
