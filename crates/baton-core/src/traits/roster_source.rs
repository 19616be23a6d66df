// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Roster source trait for spreadsheet storage backends.

use async_trait::async_trait;

use crate::error::BatonError;
use crate::types::{FileId, RosterDraft, RosterFile};

/// Lists, reads, and relocates roster spreadsheets.
///
/// A roster stays "pending" until [`RosterSource::mark_processed`] moves it,
/// so anything that fails before that point is retried on the next run.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Returns the human-readable name of this source.
    fn name(&self) -> &str;

    /// Lists pending roster files in discovery order.
    async fn list_pending(&self) -> Result<Vec<RosterFile>, BatonError>;

    /// Reads and parses one roster file.
    async fn read(&self, file_id: &FileId) -> Result<RosterDraft, BatonError>;

    /// Moves a roster file to the processed location.
    async fn mark_processed(&self, file_id: &FileId) -> Result<(), BatonError>;
}
