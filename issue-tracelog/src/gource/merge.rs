//! Chronological merge of a native VCS log with detailed-mode issue entries.

use super::detailed::DetailedBuilder;
use super::{color_for_path, sort_entries, LogEntry};
use crate::model::Issue;
use std::io::{self, BufRead};
use tracing::{debug, warn};

/// Result of merging a native log with issue entries.
#[derive(Debug, Clone, Default)]
pub struct MergedLog {
    /// Entries sorted by timestamp.
    pub entries: Vec<LogEntry>,

    /// Entries taken from the native log.
    pub native_entries: usize,

    /// Entries generated from issues.
    pub issue_entries: usize,

    /// PR-linked issues that produced entries.
    pub issues: usize,
}

/// Reads a native Gource log, coloring each entry by its file extension.
///
/// Lines that cannot be parsed are logged and skipped. Bytes that are not
/// valid UTF-8 are replaced rather than failing the read.
///
/// # Errors
///
/// Returns an error if reading from `reader` fails.
pub fn read_native_log<R: BufRead>(reader: R) -> io::Result<Vec<LogEntry>> {
    let mut entries = Vec::new();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line = String::from_utf8_lossy(&raw);
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<LogEntry>() {
            Ok(entry) => {
                let color = color_for_path(&entry.path);
                entries.push(entry.with_color(color));
            }
            Err(e) => warn!(line = index + 1, error = %e, "Skipping native log line"),
        }
    }

    debug!(count = entries.len(), "Loaded native log");
    Ok(entries)
}

/// Interleaves `native` entries with the detailed-mode entries of `issues`.
///
/// A file already present in the native log does not get a second,
/// synthetic file node; its issues hang off the branch named after it.
/// Ties keep native entries first.
#[must_use]
pub fn merge_logs(native: Vec<LogEntry>, issues: &[Issue]) -> MergedLog {
    let mut builder = DetailedBuilder::default();
    for entry in &native {
        builder.mark_existing(&entry.path);
    }
    let detailed = builder.build(issues);

    let native_entries = native.len();
    let issue_entries = detailed.entries.len();
    let mut entries = native;
    entries.extend(detailed.entries);
    sort_entries(&mut entries);

    MergedLog {
        entries,
        native_entries,
        issue_entries,
        issues: detailed.issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gource::{Action, Color};
    use serde_json::json;

    fn pr_linked_issue(files: &[&str]) -> Issue {
        serde_json::from_value(json!({
            "id": 7,
            "title": "t",
            "user": "ann",
            "start_time": "2024-01-01T00:00:00Z",
            "state": "open",
            "resolution_type": "PR_linked",
            "affected_files": files,
        }))
        .unwrap()
    }

    #[test]
    fn reads_and_colors_native_log() {
        let input = "100|dev|A|/src/a.c\n\nbroken line\n200|dev|M|/Makefile\n";

        let entries = read_native_log(input.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].color, Some(Color::from_rgb(0x0088FF)));
        assert_eq!(entries[1].color, None);
    }

    #[test]
    fn keeps_lines_that_are_not_utf8() {
        let input: &[u8] = b"100|dev|A|/src/a.c\n200|Jos\xe9|M|/src/b.c\n300|dev|D|/src/a.c\n";

        let entries = read_native_log(input).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].author, "Jos\u{FFFD}");
        assert_eq!(entries[1].path, "/src/b.c");
        assert_eq!(entries[2].action, Action::Delete);
    }

    #[test]
    fn merges_in_timestamp_order() {
        let native = read_native_log(
            "1704067100|dev|A|/src/a.c\n1704067300|dev|M|/src/a.c\n".as_bytes(),
        )
        .unwrap();

        let merged = merge_logs(native, &[pr_linked_issue(&["src/a.c"])]);
        let lines: Vec<String> = merged.entries.iter().map(ToString::to_string).collect();

        assert_eq!(
            lines,
            vec![
                "1704067100|dev|A|/src/a.c|0088FF",
                "1704067201|ann|A|/a.c/issue_7.issue|FF0000",
                "1704067300|dev|M|/src/a.c|0088FF",
            ]
        );
        assert_eq!(merged.native_entries, 2);
        assert_eq!(merged.issue_entries, 1);
        assert_eq!(merged.issues, 1);
    }

    #[test]
    fn adds_file_node_for_files_missing_from_native_log() {
        let native = vec![LogEntry::new(1, "dev", Action::Add, "/README")];

        let merged = merge_logs(native, &[pr_linked_issue(&["src/b.c"])]);

        assert_eq!(merged.entries.len(), 3);
        assert_eq!(merged.entries[1].path, "/b.c/b.c");
        assert!(merged
            .entries
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }
}
