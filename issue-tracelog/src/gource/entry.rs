//! Gource custom log entries.

use super::{Color, LogParseError};
use std::fmt;
use std::str::FromStr;

/// What happens to a path at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Modify,
    Delete,
}

impl Action {
    /// Single-letter code used in the log.
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            Self::Add => 'A',
            Self::Modify => 'M',
            Self::Delete => 'D',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Action {
    type Err = LogParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::Add),
            "M" => Ok(Self::Modify),
            "D" => Ok(Self::Delete),
            other => Err(LogParseError::InvalidAction {
                value: other.to_string(),
            }),
        }
    }
}

/// One line of a Gource custom log: `timestamp|author|action|path[|color]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Unix seconds.
    pub timestamp: i64,
    pub author: String,
    pub action: Action,
    pub path: String,
    pub color: Option<Color>,
}

impl LogEntry {
    /// Creates an uncolored entry.
    pub fn new(
        timestamp: i64,
        author: impl Into<String>,
        action: Action,
        path: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            author: author.into(),
            action,
            path: path.into(),
            color: None,
        }
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.timestamp, self.author, self.action, self.path
        )?;
        if let Some(color) = self.color {
            write!(f, "|{color}")?;
        }
        Ok(())
    }
}

impl FromStr for LogEntry {
    type Err = LogParseError;

    /// Parses a log line. A fifth field is read as a color when it is valid
    /// hex and ignored otherwise.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.split('|');
        let (Some(timestamp), Some(author), Some(action), Some(path)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(LogParseError::MissingFields {
                line: line.to_string(),
            });
        };

        let timestamp = timestamp
            .trim()
            .parse()
            .map_err(|_| LogParseError::InvalidTimestamp {
                value: timestamp.to_string(),
            })?;

        Ok(Self {
            timestamp,
            author: author.to_string(),
            action: action.parse()?,
            path: path.to_string(),
            color: fields.next().and_then(|color| color.parse().ok()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_optional_color() {
        let plain = LogEntry::new(100, "ann", Action::Add, "/src/a.c");
        let colored = plain.clone().with_color(Some(Color::ISSUE));

        assert_eq!(plain.to_string(), "100|ann|A|/src/a.c");
        assert_eq!(colored.to_string(), "100|ann|A|/src/a.c|FF0000");
    }

    #[test]
    fn parses_native_line() {
        let entry: LogEntry = "1275543595|Andrew Caudwell|M|/src/gource.cpp\n"
            .parse()
            .unwrap();

        assert_eq!(entry.timestamp, 1_275_543_595);
        assert_eq!(entry.author, "Andrew Caudwell");
        assert_eq!(entry.action, Action::Modify);
        assert_eq!(entry.path, "/src/gource.cpp");
        assert_eq!(entry.color, None);
    }

    #[test]
    fn parses_trailing_color() {
        let entry: LogEntry = "5|bob|D|/x.h|00AAFF".parse().unwrap();
        assert_eq!(entry.color, Some(Color::from_rgb(0x00AAFF)));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            "5|bob|M".parse::<LogEntry>(),
            Err(LogParseError::MissingFields { .. })
        ));
        assert!(matches!(
            "soon|bob|M|/x".parse::<LogEntry>(),
            Err(LogParseError::InvalidTimestamp { .. })
        ));
        assert!(matches!(
            "5|bob|X|/x".parse::<LogEntry>(),
            Err(LogParseError::InvalidAction { .. })
        ));
    }
}
