// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Baton survey scheduler.
//!
//! This crate provides the error taxonomy, the data contracts that flow
//! between the roster source, the survey platform, and the reconciliation
//! engine, and the adapter traits both remote collaborators implement.

pub mod error;
pub mod timestamp;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BatonError;
pub use traits::{RosterSource, SurveyPlatform};
pub use types::{
    Collector, CollectorId, FileId, MessageId, MessageKind, MessageSummary, RecipientId,
    RecipientSummary, RosterDraft, RosterFile, RosterRecord, SurveyId,
};
