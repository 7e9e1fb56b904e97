//! Files passed between the passes.
//!
//! All pass outputs live in one directory and are named after the
//! repository:
//! - `<repo>_issues.json` - raw issue listing
//! - `<repo>_issues_commits.json` - linked issues
//! - `<repo>_gource*.log`, `<repo>_merged.log` - Gource logs

mod error;

pub use error::StoreError;

use crate::github::RawIssue;
use crate::gource::{read_native_log, write_log, LogEntry};
use crate::model::{Issue, RepoRef};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads and writes pass outputs for one repository.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
    repo: RepoRef,
}

impl Store {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, repo: RepoRef) -> Self {
        Self {
            dir: dir.into(),
            repo,
        }
    }

    /// Path of the raw issue dump.
    #[must_use]
    pub fn raw_issues_path(&self) -> PathBuf {
        self.dir.join(self.repo.raw_issues_file())
    }

    /// Path of the linked issue corpus.
    #[must_use]
    pub fn linked_issues_path(&self) -> PathBuf {
        self.dir.join(self.repo.linked_issues_file())
    }

    /// Default path of the simple-mode log.
    #[must_use]
    pub fn simple_log_path(&self) -> PathBuf {
        self.dir.join(self.repo.simple_log_file())
    }

    /// Default path of the detailed-mode log.
    #[must_use]
    pub fn detailed_log_path(&self) -> PathBuf {
        self.dir.join(self.repo.detailed_log_file())
    }

    /// Default path of the merged log.
    #[must_use]
    pub fn merged_log_path(&self) -> PathBuf {
        self.dir.join(self.repo.merged_log_file())
    }

    /// Saves the raw issue listing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be written.
    pub fn save_raw_issues(&self, issues: &[RawIssue]) -> Result<PathBuf, StoreError> {
        let path = self.raw_issues_path();
        write_json(&path, issues)?;
        Ok(path)
    }

    /// Loads the raw issue listing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] if the fetch pass has not run.
    pub fn load_raw_issues(&self) -> Result<Vec<RawIssue>, StoreError> {
        read_json(&self.raw_issues_path())
    }

    /// Saves the linked issues.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be written.
    pub fn save_linked_issues(&self, issues: &[Issue]) -> Result<PathBuf, StoreError> {
        let path = self.linked_issues_path();
        write_json(&path, issues)?;
        Ok(path)
    }

    /// Loads the linked issues.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] if the link pass has not run.
    pub fn load_linked_issues(&self) -> Result<Vec<Issue>, StoreError> {
        read_json(&self.linked_issues_path())
    }
}

/// Writes a Gource log to `path`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be written.
pub fn save_log(path: &Path, entries: &[LogEntry]) -> Result<(), StoreError> {
    let file = create(path)?;
    write_log(BufWriter::new(file), entries).map_err(|source| io_error(path, source))?;
    info!(path = %path.display(), entries = entries.len(), "Wrote log");
    Ok(())
}

/// Reads a native Gource log from `path`.
///
/// # Errors
///
/// Returns [`StoreError::Missing`] if the file does not exist.
pub fn load_native_log(path: &Path) -> Result<Vec<LogEntry>, StoreError> {
    let file = open(path)?;
    read_native_log(BufReader::new(file)).map_err(|source| io_error(path, source))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    let mut writer = BufWriter::new(create(path)?);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })?;
    writer.flush().map_err(|source| io_error(path, source))?;
    debug!(path = %path.display(), "Saved JSON");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })
}

fn open(path: &Path) -> Result<File, StoreError> {
    File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::Missing {
                path: path.display().to_string(),
            }
        } else {
            io_error(path, source)
        }
    })
}

fn create(path: &Path) -> Result<File, StoreError> {
    File::create(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
