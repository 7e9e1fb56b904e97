//! Timestamp conversion.

use chrono::{DateTime, NaiveDateTime};
use tracing::warn;

/// Converts an ISO-8601 timestamp to unix seconds.
///
/// Timestamps without an offset are taken as UTC. Empty input yields `None`
/// silently; anything unparseable is logged and yields `None`.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.timestamp());
    }

    match NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        Ok(naive) => Some(naive.and_utc().timestamp()),
        Err(e) => {
            warn!(value, error = %e, "Unparseable timestamp, treating as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_utc_timestamp() {
        assert_eq!(parse_timestamp("2024-01-01T00:00:00Z"), Some(1_704_067_200));
    }

    #[test]
    fn applies_offset() {
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00+02:00"),
            Some(1_704_067_200)
        );
    }

    #[test]
    fn treats_naive_timestamp_as_utc() {
        assert_eq!(parse_timestamp("2024-01-01T00:00:00"), Some(1_704_067_200));
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
