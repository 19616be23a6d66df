// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Baton survey scheduler.

use thiserror::Error;

/// The primary error type used across all Baton adapters and the reconciliation engine.
///
/// "Does not exist yet" is never an error: lookups return `Option` and the
/// caller branches on absence.
#[derive(Debug, Error)]
pub enum BatonError {
    /// Configuration errors (missing credentials, unknown time zone, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// An event timestamp did not match `YYYY-MM-DD HH:MM` or names an impossible local time.
    #[error("malformed timestamp `{input}`: {reason}")]
    MalformedTimestamp { input: String, reason: String },

    /// A roster failed validation. Every problem found is listed.
    #[error("roster failed validation: {}", problems.join("; "))]
    ValidationFailed { problems: Vec<String> },

    /// A collector carries an unexpected composition of messages.
    #[error("collector {collector_id} has invalid message state: {detail}")]
    InvalidMessageState { collector_id: String, detail: String },

    /// A remote service answered with a non-success HTTP status.
    #[error("{service} returned HTTP {status_code}: {body}")]
    RemoteApi {
        service: &'static str,
        status_code: u16,
        body: String,
    },

    /// A request could not be sent, or its response could not be read or decoded.
    #[error("{service} transport error: {message}")]
    Transport {
        service: &'static str,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BatonError {
    /// Returns true for failures that originate in a remote service call.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteApi { .. } | Self::Transport { .. })
    }

    /// Returns the HTTP status of a [`BatonError::RemoteApi`] error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
