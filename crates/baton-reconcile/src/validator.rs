// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Roster completeness checks.
//!
//! Every check runs; a roster with several defects reports all of them.

use std::fmt;

use baton_core::{BatonError, RosterDraft, RosterRecord};
use chrono::{DateTime, Utc};

use crate::time::ScheduleRules;

/// One reason a roster cannot be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterProblem {
    NoRecipients,
    MissingTitle,
    MissingConductor,
    MissingTimestamp,
    MalformedTimestamp { input: String, reason: String },
    EventNotInFuture { event_at: DateTime<Utc> },
}

impl fmt::Display for RosterProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecipients => f.write_str("roster lists no recipients"),
            Self::MissingTitle => f.write_str("event title is missing"),
            Self::MissingConductor => f.write_str("conductor name is missing"),
            Self::MissingTimestamp => f.write_str("event date/time is missing"),
            Self::MalformedTimestamp { input, reason } => {
                write!(f, "event date/time `{input}` is unusable: {reason}")
            }
            Self::EventNotInFuture { event_at } => write!(
                f,
                "event at {} is not in the future",
                baton_core::timestamp::format_utc(event_at)
            ),
        }
    }
}

/// Checks a parsed roster and promotes it to a [`RosterRecord`].
///
/// `now` is the instant the event must come strictly after.
pub fn validate_roster(
    draft: &RosterDraft,
    rules: &ScheduleRules,
    now: DateTime<Utc>,
) -> Result<RosterRecord, Vec<RosterProblem>> {
    let mut problems = Vec::new();

    if draft.recipient_emails.is_empty() {
        problems.push(RosterProblem::NoRecipients);
    }

    let title = present(&draft.event_title);
    if title.is_none() {
        problems.push(RosterProblem::MissingTitle);
    }

    let conductor = present(&draft.conductor_name);
    if conductor.is_none() {
        problems.push(RosterProblem::MissingConductor);
    }

    let timestamp = present(&draft.event_local_timestamp);
    match timestamp.map(|ts| rules.event_instant(ts)) {
        None => problems.push(RosterProblem::MissingTimestamp),
        Some(Err(BatonError::MalformedTimestamp { input, reason })) => {
            problems.push(RosterProblem::MalformedTimestamp { input, reason })
        }
        Some(Err(other)) => problems.push(RosterProblem::MalformedTimestamp {
            input: timestamp.unwrap_or_default().to_string(),
            reason: other.to_string(),
        }),
        Some(Ok(event_at)) if event_at <= now => {
            problems.push(RosterProblem::EventNotInFuture { event_at })
        }
        Some(Ok(_)) => {}
    }

    match (title, conductor, timestamp) {
        (Some(title), Some(conductor), Some(timestamp)) if problems.is_empty() => {
            Ok(RosterRecord {
                event_title: title.to_string(),
                conductor_name: conductor.to_string(),
                event_local_timestamp: timestamp.to_string(),
                recipient_emails: draft.recipient_emails.clone(),
            })
        }
        _ => Err(problems),
    }
}

/// Collapses problems into the error the engine reports for a skipped roster.
pub fn into_validation_error(problems: Vec<RosterProblem>) -> BatonError {
    BatonError::ValidationFailed {
        problems: problems.iter().map(ToString::to_string).collect(),
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
