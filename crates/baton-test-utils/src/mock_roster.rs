// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock roster source for deterministic testing.
//!
//! `MockRosterSource` implements `RosterSource` over an in-memory list of
//! rosters. `mark_processed()` moves a roster out of the pending listing so
//! tests can assert which rosters would be retried.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use baton_core::{BatonError, FileId, RosterDraft, RosterFile, RosterSource};

struct MockRoster {
    file: RosterFile,
    /// `None` makes `read()` fail with a remote error.
    draft: Option<RosterDraft>,
}

#[derive(Default)]
struct State {
    rosters: Vec<MockRoster>,
    processed: Vec<FileId>,
    fail_listing: bool,
    fail_marking: HashSet<FileId>,
}

/// An in-memory roster source.
#[derive(Clone, Default)]
pub struct MockRosterSource {
    state: Arc<Mutex<State>>,
}

impl MockRosterSource {
    /// Create an empty roster source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pending roster.
    pub async fn add_roster(&self, id: &str, name: &str, draft: RosterDraft) {
        self.state.lock().await.rosters.push(MockRoster {
            file: RosterFile {
                id: FileId::from(id),
                name: name.to_string(),
            },
            draft: Some(draft),
        });
    }

    /// Add a pending roster whose content cannot be read.
    pub async fn add_unreadable_roster(&self, id: &str, name: &str) {
        self.state.lock().await.rosters.push(MockRoster {
            file: RosterFile {
                id: FileId::from(id),
                name: name.to_string(),
            },
            draft: None,
        });
    }

    /// Make `list_pending()` fail.
    pub async fn fail_listing(&self) {
        self.state.lock().await.fail_listing = true;
    }

    /// Make `mark_processed()` fail for one roster.
    pub async fn fail_marking(&self, id: &str) {
        self.state.lock().await.fail_marking.insert(FileId::from(id));
    }

    /// Ids of rosters moved to the processed location, in order.
    pub async fn processed(&self) -> Vec<FileId> {
        self.state.lock().await.processed.clone()
    }

    /// Ids of rosters still pending.
    pub async fn pending(&self) -> Vec<FileId> {
        let state = self.state.lock().await;
        state
            .rosters
            .iter()
            .map(|r| r.file.id.clone())
            .filter(|id| !state.processed.contains(id))
            .collect()
    }
}

fn remote_error(status_code: u16, body: &str) -> BatonError {
    BatonError::RemoteApi {
        service: "mock-roster-source",
        status_code,
        body: body.to_string(),
    }
}

#[async_trait]
impl RosterSource for MockRosterSource {
    fn name(&self) -> &str {
        "mock-roster-source"
    }

    async fn list_pending(&self) -> Result<Vec<RosterFile>, BatonError> {
        let state = self.state.lock().await;
        if state.fail_listing {
            return Err(remote_error(503, "listing unavailable"));
        }
        Ok(state
            .rosters
            .iter()
            .filter(|r| !state.processed.contains(&r.file.id))
            .map(|r| r.file.clone())
            .collect())
    }

    async fn read(&self, file_id: &FileId) -> Result<RosterDraft, BatonError> {
        let state = self.state.lock().await;
        match state.rosters.iter().find(|r| &r.file.id == file_id) {
            Some(MockRoster {
                draft: Some(draft), ..
            }) => Ok(draft.clone()),
            Some(_) => Err(remote_error(500, "spreadsheet read failed")),
            None => Err(remote_error(404, "no such file")),
        }
    }

    async fn mark_processed(&self, file_id: &FileId) -> Result<(), BatonError> {
        let mut state = self.state.lock().await;
        if state.fail_marking.contains(file_id) {
            return Err(remote_error(500, "move failed"));
        }
        if !state.processed.contains(file_id) {
            state.processed.push(file_id.clone());
        }
        Ok(())
    }
}
