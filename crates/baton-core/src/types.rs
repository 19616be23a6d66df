// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data contracts shared by the roster source, the survey platform client,
//! and the reconciliation engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Returns the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a roster spreadsheet in the cloud drive.
    FileId
);
string_id!(
    /// Survey platform identifier of a survey.
    SurveyId
);
string_id!(
    /// Survey platform identifier of a collector.
    CollectorId
);
string_id!(
    /// Survey platform identifier of a collector message.
    MessageId
);
string_id!(
    /// Survey platform identifier of a collector recipient.
    RecipientId
);

/// A roster file waiting to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterFile {
    pub id: FileId,
    pub name: String,
}

/// Parsed roster content before validation. Header cells that were blank
/// or missing are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterDraft {
    pub event_title: Option<String>,
    pub conductor_name: Option<String>,
    /// Event start in `YYYY-MM-DD HH:MM`, local to the reference time zone.
    pub event_local_timestamp: Option<String>,
    /// Sheet recipients followed by the standing recipients, deduplicated.
    pub recipient_emails: Vec<String>,
}

/// A roster that passed validation. Immutable for the rest of the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRecord {
    pub event_title: String,
    pub conductor_name: String,
    pub event_local_timestamp: String,
    pub recipient_emails: Vec<String>,
}

/// A collector as returned by lookup or creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collector {
    pub id: CollectorId,
    /// Public survey link, when the platform reports one.
    pub url: Option<String>,
    /// Close time the collector carries on the platform, when reported.
    pub close_at: Option<DateTime<Utc>>,
}

/// The kind of a collector message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    Invite,
    Reminder,
    /// Any kind this system never creates (e.g. `thank_you`).
    #[serde(other)]
    Other,
}

/// A message attached to a collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSummary {
    pub id: MessageId,
    pub kind: MessageKind,
}

/// A recipient attached to a collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientSummary {
    pub id: RecipientId,
    pub email: String,
}
