//! Timestamp encoding
//!
//! Rows store UTC timestamps as fixed-width RFC 3339 text with millisecond
//! precision, matching `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')`. Fixed width
//! keeps text ordering identical to time ordering.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Parse a stored timestamp for column `idx`. Malformed values are reported
/// as a conversion failure rather than replaced.
pub fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_width_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-09T07:05:01.000Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp(4, "yesterday").is_err());

        let parsed = parse_timestamp(0, "2024-03-09T07:05:01.250Z").unwrap();
        assert_eq!(parsed.timestamp_millis() % 1000, 250);
    }
}
