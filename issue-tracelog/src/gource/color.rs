//! Colors for log entries.

use super::LogParseError;
use std::fmt;
use std::str::FromStr;

/// An RGB color written as six hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Red used for issue nodes.
    pub const ISSUE: Color = Color(0xFF0000);

    /// Creates a color from a `0xRRGGBB` value.
    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

impl FromStr for Color {
    type Err = LogParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LogParseError::InvalidColor {
            value: s.to_string(),
        };
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u32::from_str_radix(s, 16).map(Self).map_err(|_| invalid())
    }
}

/// Color for a path, chosen by its extension.
///
/// The extension is whatever follows the last `.` in the whole path,
/// lower-cased. Reds are left out so files never look like issues.
#[must_use]
pub fn color_for_path(path: &str) -> Option<Color> {
    let (_, extension) = path.rsplit_once('.')?;
    let rgb = match extension.to_ascii_lowercase().as_str() {
        // Source
        "cpp" => 0x0066FF,
        "c" => 0x0088FF,
        "h" => 0x00AAFF,
        "hpp" => 0x0099FF,
        // Scripts
        "py" => 0xFFFF00,
        "pl" => 0xFFDD00,
        "rb" => 0xFFD700,
        "sh" => 0xFFCC00,
        // Configuration
        "conf" | "config" => 0x00FF00,
        "yaml" | "yml" => 0x00DD00,
        "json" => 0x00EE00,
        "ini" => 0x00CC00,
        // Documentation
        "md" => 0x00FFFF,
        "txt" => 0x00DDDD,
        "rst" => 0x00CCCC,
        "1" => 0x00EEEE,
        // Build
        "am" => 0x9966FF,
        "ac" => 0xAA77FF,
        "m4" => 0x8855EE,
        "in" => 0x7744DD,
        // Other
        "gitignore" => 0x888888,
        "log" => 0x666666,
        _ => return None,
    };
    Some(Color::from_rgb(rgb))
}
