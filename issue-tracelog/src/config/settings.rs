//! Settings file deserialization.

use super::ConfigError;
use crate::rate_limit::Pacing;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parsed contents of a settings TOML file.
///
/// Every key is optional; command-line flags fill in or override values.
///
/// ```toml
/// owner = "acaudwell"
/// repo = "Gource"
/// token-file = "t.txt"
/// output-dir = "out"
/// link-open-issues = false
///
/// [pacing]
/// timeline-ms = 300
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Repository owner.
    pub owner: Option<String>,

    /// Repository name.
    pub repo: Option<String>,

    /// File holding the GitHub token.
    pub token_file: Option<PathBuf>,

    /// Directory for the JSON corpora and logs.
    pub output_dir: Option<PathBuf>,

    /// Scan the timelines of open issues as well as closed ones.
    #[serde(default)]
    pub link_open_issues: bool,

    /// Delays between API calls.
    #[serde(default)]
    pub pacing: Pacing,
}

impl Settings {
    /// Loads and validates settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, not
    /// valid TOML, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(path)?;
        Ok(settings)
    }

    /// Validates the values that are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] on an empty owner or repo, or
    /// one containing a `/`.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        for (key, value) in [("owner", &self.owner), ("repo", &self.repo)] {
            if let Some(value) = value {
                validate_coordinate(key, value).map_err(|message| {
                    ConfigError::ValidationError {
                        path: path.display().to_string(),
                        message,
                    }
                })?;
            }
        }
        Ok(())
    }
}

/// Checks one half of an `owner/name` pair.
pub(crate) fn validate_coordinate(key: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{key} is empty"));
    }
    if value.contains('/') {
        return Err(format!("{key} '{value}' must not contain '/'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join("tracelog.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_full_settings() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            r#"
owner = "acaudwell"
repo = "Gource"
token-file = "secrets/t.txt"
output-dir = "out"
link-open-issues = true

[pacing]
timeline-ms = 0
"#,
        );

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.owner.as_deref(), Some("acaudwell"));
        assert_eq!(settings.repo.as_deref(), Some("Gource"));
        assert_eq!(settings.token_file, Some(PathBuf::from("secrets/t.txt")));
        assert_eq!(settings.output_dir, Some(PathBuf::from("out")));
        assert!(settings.link_open_issues);
        assert_eq!(settings.pacing.timeline_ms, 0);
        assert_eq!(settings.pacing.commit_ms, Pacing::default().commit_ms);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(&write(&temp, "")).unwrap();

        assert!(settings.owner.is_none());
        assert!(!settings.link_open_issues);
        assert_eq!(settings.pacing, Pacing::default());
    }

    #[test]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let result = Settings::load(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let result = Settings::load(&write(&temp, "owner = \"a\"\ncolour = \"red\"\n"));
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn rejects_slash_in_repo() {
        let temp = TempDir::new().unwrap();
        let result = Settings::load(&write(&temp, "repo = \"acaudwell/Gource\"\n"));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_empty_owner() {
        let temp = TempDir::new().unwrap();
        let result = Settings::load(&write(&temp, "owner = \"  \"\n"));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
