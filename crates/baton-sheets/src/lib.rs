// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Drive roster source for the Baton survey scheduler.
//!
//! Rosters are spreadsheets in an "unprocessed" Drive folder. This crate
//! implements [`RosterSource`] by listing that folder, reading the roster
//! worksheet through the Sheets API, and moving finished rosters to the
//! "processed" folder.

pub mod client;
pub mod roster;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use baton_config::BatonConfig;
use baton_core::{BatonError, FileId, RosterDraft, RosterFile, RosterSource};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::GoogleClient;

pub use roster::parse_roster_rows;

/// Environment variable consulted when the config carries no token.
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";

/// Google Drive implementation of [`RosterSource`].
///
/// Access token resolution order: config -> `GOOGLE_ACCESS_TOKEN` env var -> error.
pub struct GoogleRosterSource {
    client: GoogleClient,
    unprocessed_folder_id: String,
    processed_folder_id: String,
    worksheet: String,
    email_column: usize,
    standing_recipients: Vec<String>,
}

impl GoogleRosterSource {
    /// Creates the roster source from the given configuration.
    pub fn new(config: &BatonConfig) -> Result<Self, BatonError> {
        let token = resolve_access_token(&config.google.access_token)?;
        let client = GoogleClient::new(
            &token,
            &config.google.drive_base_url,
            &config.google.sheets_base_url,
            Duration::from_secs(config.google.timeout_secs),
        )?;

        info!(
            unprocessed = %config.google.unprocessed_folder_id,
            processed = %config.google.processed_folder_id,
            worksheet = %config.google.worksheet,
            "Google roster source initialized"
        );

        Ok(Self {
            client,
            unprocessed_folder_id: config.google.unprocessed_folder_id.clone(),
            processed_folder_id: config.google.processed_folder_id.clone(),
            worksheet: config.google.worksheet.clone(),
            email_column: config.google.email_column,
            standing_recipients: config.roster.standing_recipients.clone(),
        })
    }
}

#[async_trait]
impl RosterSource for GoogleRosterSource {
    fn name(&self) -> &str {
        "google-drive"
    }

    async fn list_pending(&self) -> Result<Vec<RosterFile>, BatonError> {
        let files = self
            .client
            .list_spreadsheets(&self.unprocessed_folder_id)
            .await?;
        Ok(files
            .into_iter()
            .map(|f| RosterFile {
                id: FileId(f.id),
                name: f.name,
            })
            .collect())
    }

    async fn read(&self, file_id: &FileId) -> Result<RosterDraft, BatonError> {
        let rows = self
            .client
            .read_values(file_id.as_str(), &self.worksheet)
            .await?;
        debug!(file_id = %file_id, rows = rows.len(), "roster sheet read");
        Ok(parse_roster_rows(
            &rows,
            self.email_column,
            &self.standing_recipients,
        ))
    }

    async fn mark_processed(&self, file_id: &FileId) -> Result<(), BatonError> {
        let parents = self.client.parents(file_id.as_str()).await?;
        let remove: Vec<String> = parents
            .into_iter()
            .filter(|p| p != &self.processed_folder_id)
            .collect();
        self.client
            .move_file(file_id.as_str(), &self.processed_folder_id, &remove)
            .await?;
        info!(file_id = %file_id, folder = %self.processed_folder_id, "roster moved to processed folder");
        Ok(())
    }
}

/// Resolves the access token from config first, then the environment.
fn resolve_access_token(config_token: &Option<String>) -> Result<SecretString, BatonError> {
    if let Some(token) = config_token
        && !token.is_empty()
    {
        return Ok(SecretString::from(token.clone()));
    }

    std::env::var(ACCESS_TOKEN_ENV)
        .ok()
        .filter(|t| !t.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| {
            BatonError::Config(format!(
                "Google access token not found. Set google.access_token in config or {ACCESS_TOKEN_ENV} environment variable."
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    fn resolve_access_token_from_config() {
        let token = resolve_access_token(&Some("ya29.test".into())).unwrap();
        assert_eq!(token.expose_secret(), "ya29.test");
    }

    #[test]
    #[serial]
    fn resolve_access_token_none_falls_back_to_env() {
        // SAFETY: test-only env mutation; env tests are serialized.
        unsafe { std::env::set_var(ACCESS_TOKEN_ENV, "ya29.env") };
        let token = resolve_access_token(&None);
        unsafe { std::env::remove_var(ACCESS_TOKEN_ENV) };

        assert_eq!(token.unwrap().expose_secret(), "ya29.env");
    }

    #[test]
    #[serial]
    fn blank_env_token_is_rejected() {
        unsafe { std::env::set_var(ACCESS_TOKEN_ENV, "") };
        let result = resolve_access_token(&None);
        unsafe { std::env::remove_var(ACCESS_TOKEN_ENV) };

        let err = result.err().unwrap().to_string();
        assert!(err.contains(ACCESS_TOKEN_ENV), "got: {err}");
    }
}
