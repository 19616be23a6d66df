// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Send-time and close-time calculation.
//!
//! Event timestamps are wall-clock times in the reference zone. They are
//! localized with the zone's real offset rules (not a fixed offset) and every
//! derived instant is computed on the UTC timeline.

use baton_core::BatonError;
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Format of a roster's event timestamp.
pub const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Offsets applied to an event's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRules {
    /// Zone the event timestamp is written in.
    pub time_zone: Tz,
    /// Event start to invite send.
    pub invite_delay: TimeDelta,
    /// Invite send to collector close.
    pub close_after: TimeDelta,
    /// Invite send to reminder send.
    pub reminder_lead: TimeDelta,
}

impl Default for ScheduleRules {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::America::Los_Angeles,
            invite_delay: TimeDelta::minutes(100),
            close_after: TimeDelta::days(8),
            reminder_lead: TimeDelta::days(3),
        }
    }
}

/// The three instants derived from one event timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTimes {
    pub invite_at: DateTime<Utc>,
    pub reminder_at: DateTime<Utc>,
    pub close_at: DateTime<Utc>,
}

impl ScheduleRules {
    /// Localizes `YYYY-MM-DD HH:MM` in the reference zone and returns the UTC instant.
    ///
    /// A wall time that occurs twice (DST fall-back) resolves to the earlier
    /// instant. A wall time skipped by a DST jump is malformed.
    pub fn event_instant(&self, event_local: &str) -> Result<DateTime<Utc>, BatonError> {
        let input = event_local.trim();
        if !has_event_shape(input) {
            return Err(malformed(event_local, "expected `YYYY-MM-DD HH:MM`"));
        }
        let naive = NaiveDateTime::parse_from_str(input, EVENT_TIMESTAMP_FORMAT)
            .map_err(|e| malformed(event_local, &e.to_string()))?;

        match self.time_zone.from_local_datetime(&naive) {
            LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => Err(malformed(
                event_local,
                &format!("local time does not exist in {}", self.time_zone.name()),
            )),
        }
    }

    /// Event start plus the invite delay.
    pub fn invite_send_time(&self, event_local: &str) -> Result<DateTime<Utc>, BatonError> {
        shift(self.event_instant(event_local)?, self.invite_delay, event_local)
    }

    /// Invite send time plus the close delay.
    pub fn collector_close_time(&self, event_local: &str) -> Result<DateTime<Utc>, BatonError> {
        shift(self.invite_send_time(event_local)?, self.close_after, event_local)
    }

    /// Invite send time plus the reminder lead.
    pub fn reminder_send_time(&self, event_local: &str) -> Result<DateTime<Utc>, BatonError> {
        shift(self.invite_send_time(event_local)?, self.reminder_lead, event_local)
    }

    /// Computes all three instants at once.
    pub fn compute(&self, event_local: &str) -> Result<ScheduleTimes, BatonError> {
        let invite_at = self.invite_send_time(event_local)?;
        Ok(ScheduleTimes {
            invite_at,
            reminder_at: shift(invite_at, self.reminder_lead, event_local)?,
            close_at: shift(invite_at, self.close_after, event_local)?,
        })
    }
}

fn shift(
    instant: DateTime<Utc>,
    delta: TimeDelta,
    event_local: &str,
) -> Result<DateTime<Utc>, BatonError> {
    instant
        .checked_add_signed(delta)
        .ok_or_else(|| malformed(event_local, "derived send time is out of range"))
}

/// `NaiveDateTime::parse_from_str` tolerates single-digit fields; rosters must not.
fn has_event_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 16
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

fn malformed(input: &str, reason: &str) -> BatonError {
    BatonError::MalformedTimestamp {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baton_core::timestamp::format_utc;
    use proptest::prelude::*;

    fn rules() -> ScheduleRules {
        ScheduleRules::default()
    }

    #[test]
    fn september_event_uses_daylight_offset() {
        // 20:00 PDT is 03:00Z the next day.
        let times = rules().compute("2025-09-16 20:00").unwrap();
        assert_eq!(format_utc(&times.invite_at), "2025-09-17T04:40:00Z");
        assert_eq!(format_utc(&times.reminder_at), "2025-09-20T04:40:00Z");
        assert_eq!(format_utc(&times.close_at), "2025-09-25T04:40:00Z");
    }

    #[test]
    fn january_event_uses_standard_offset() {
        // 19:30 PST is 03:30Z the next day.
        let invite = rules().invite_send_time("2025-01-10 19:30").unwrap();
        assert_eq!(format_utc(&invite), "2025-01-11T05:10:00Z");
    }

    #[test]
    fn spring_forward_day_keeps_elapsed_minutes() {
        // 01:30 PST is before the jump; the invite lands after it, at 04:10 PDT.
        let event = rules().event_instant("2025-03-09 01:30").unwrap();
        let invite = rules().invite_send_time("2025-03-09 01:30").unwrap();
        assert_eq!(format_utc(&event), "2025-03-09T09:30:00Z");
        assert_eq!(format_utc(&invite), "2025-03-09T11:10:00Z");
        assert_eq!(invite - event, TimeDelta::minutes(100));
    }

    #[test]
    fn skipped_wall_time_is_malformed() {
        let err = rules().compute("2025-03-09 02:30").unwrap_err();
        assert!(matches!(err, BatonError::MalformedTimestamp { .. }), "got: {err}");
    }

    #[test]
    fn repeated_wall_time_resolves_to_earlier_instant() {
        // 01:30 happens first at PDT (UTC-7).
        let event = rules().event_instant("2025-11-02 01:30").unwrap();
        assert_eq!(format_utc(&event), "2025-11-02T08:30:00Z");
    }

    #[test]
    fn pattern_mismatches_are_malformed() {
        for input in [
            "",
            "2025-09-16",
            "2025-9-16 20:00",
            "2025-09-16T20:00",
            "2025-09-16 20:00:00",
            "16/09/2025 20:00",
            "2025-02-30 20:00",
            "2025-09-16 25:00",
        ] {
            let err = rules().invite_send_time(input).unwrap_err();
            assert!(
                matches!(err, BatonError::MalformedTimestamp { .. }),
                "{input:?} should be malformed, got: {err}"
            );
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            rules().event_instant("  2025-09-16 20:00 ").unwrap(),
            rules().event_instant("2025-09-16 20:00").unwrap()
        );
    }

    #[test]
    fn reminder_lead_is_configurable() {
        let rules = ScheduleRules {
            reminder_lead: TimeDelta::days(2),
            ..ScheduleRules::default()
        };
        let reminder = rules.reminder_send_time("2025-09-16 20:00").unwrap();
        assert_eq!(format_utc(&reminder), "2025-09-19T04:40:00Z");
    }

    #[test]
    fn overflowing_offset_is_malformed() {
        let rules = ScheduleRules {
            close_after: TimeDelta::days(100_000_000),
            ..ScheduleRules::default()
        };
        let err = rules.compute("2025-09-16 20:00").unwrap_err();
        assert!(matches!(err, BatonError::MalformedTimestamp { .. }), "got: {err}");
        assert!(rules.reminder_send_time("2025-09-16 20:00").is_ok());
    }

    proptest! {
        #[test]
        fn derived_instants_keep_fixed_distances(
            day in 0i64..(366 * 6),
            minute in 0i64..(24 * 60),
        ) {
            let start = NaiveDateTime::parse_from_str("2024-01-01 00:00", EVENT_TIMESTAMP_FORMAT).unwrap();
            let local = start + TimeDelta::days(day) + TimeDelta::minutes(minute);
            let input = local.format(EVENT_TIMESTAMP_FORMAT).to_string();

            let rules = ScheduleRules::default();
            match rules.event_instant(&input) {
                Ok(event) => {
                    let times = rules.compute(&input).unwrap();
                    prop_assert_eq!(times.invite_at - event, TimeDelta::minutes(100));
                    prop_assert_eq!(times.close_at - times.invite_at, TimeDelta::days(8));
                    prop_assert_eq!(times.reminder_at - times.invite_at, TimeDelta::days(3));
                }
                // Only the skipped spring-forward hour may fail.
                Err(_) => prop_assert_eq!(local.format("%H").to_string(), "02"),
            }
        }
    }
}
