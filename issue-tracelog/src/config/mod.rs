//! Settings and credentials.
//!
//! Settings come from an optional TOML file; the GitHub token is read from
//! a separate plain-text file so it never ends up in the settings.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::Settings;

use crate::model::RepoRef;
use std::path::Path;
use tracing::debug;

/// Token file used when none is configured.
pub const DEFAULT_TOKEN_FILE: &str = "t.txt";

/// Reads a GitHub token from `path`, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if the file does not exist and
/// [`ConfigError::EmptyToken`] if it holds only whitespace.
pub fn load_token(path: &Path) -> Result<String, ConfigError> {
    debug!(path = %path.display(), "Reading token");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::MissingFile {
                path: path.display().to_string(),
            }
        } else {
            ConfigError::IoError {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let token = content.trim();
    if token.is_empty() {
        return Err(ConfigError::EmptyToken {
            path: path.display().to_string(),
        });
    }
    Ok(token.to_string())
}

/// Builds a validated [`RepoRef`] from owner and name.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] if either part is missing,
/// empty, or contains a `/`.
pub fn resolve_repo(owner: Option<&str>, name: Option<&str>) -> Result<RepoRef, ConfigError> {
    let owner = owner.ok_or_else(|| missing_setting("owner"))?;
    let name = name.ok_or_else(|| missing_setting("repo"))?;
    for (key, value) in [("owner", owner), ("repo", name)] {
        settings::validate_coordinate(key, value).map_err(|message| {
            ConfigError::ValidationError {
                path: "<command line>".to_string(),
                message,
            }
        })?;
    }
    Ok(RepoRef::new(owner, name))
}

fn missing_setting(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        path: "<command line>".to_string(),
        message: format!("{key} is not set; pass --{key} or set it in the settings file"),
    }
}
