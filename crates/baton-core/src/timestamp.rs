// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! UTC timestamp wire format.
//!
//! Outgoing timestamps always carry a literal trailing `Z`, never `+00:00`.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::BatonError;

/// Serializes an instant as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parses an ISO-8601 UTC timestamp with a trailing `Z` or an explicit offset.
///
/// A timestamp without any zone designator is read as UTC.
pub fn parse_utc(input: &str) -> Result<DateTime<Utc>, BatonError> {
    let trimmed = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| BatonError::MalformedTimestamp {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_literal_z() {
        let instant = Utc.with_ymd_and_hms(2025, 9, 17, 4, 40, 0).unwrap();
        assert_eq!(format_utc(&instant), "2025-09-17T04:40:00Z");
    }

    #[test]
    fn accepts_trailing_z_and_offsets() {
        let expected = Utc.with_ymd_and_hms(2025, 9, 25, 4, 40, 0).unwrap();
        assert_eq!(parse_utc("2025-09-25T04:40:00Z").unwrap(), expected);
        assert_eq!(parse_utc("2025-09-25T04:40:00+00:00").unwrap(), expected);
        assert_eq!(parse_utc("2025-09-24T21:40:00-07:00").unwrap(), expected);
        assert_eq!(parse_utc("2025-09-25T04:40:00").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_utc("next tuesday").unwrap_err();
        assert!(matches!(err, BatonError::MalformedTimestamp { .. }));
    }
}
