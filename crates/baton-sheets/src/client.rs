// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for Google Drive v3 and Google Sheets v4.
//!
//! Provides [`GoogleClient`] which handles bearer authentication, Drive
//! `nextPageToken` pagination, and transient error retry.

use std::time::Duration;

use baton_core::BatonError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, DriveFile, FileList, FileParents, ValueRange};

const SERVICE: &str = "google";

const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// HTTP client for Google API communication.
///
/// Retries once on transient errors (429, 500, 502, 503, 504).
#[derive(Debug, Clone)]
pub struct GoogleClient {
    client: reqwest::Client,
    drive_base_url: String,
    sheets_base_url: String,
    max_retries: u32,
}

impl GoogleClient {
    /// Creates a client authenticated with an OAuth bearer access token.
    pub fn new(
        access_token: &SecretString,
        drive_base_url: &str,
        sheets_base_url: &str,
        timeout: Duration,
    ) -> Result<Self, BatonError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", access_token.expose_secret()))
            .map_err(|e| BatonError::Config(format!("invalid Google access token header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| BatonError::Transport {
                service: SERVICE,
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            drive_base_url: drive_base_url.to_string(),
            sheets_base_url: sheets_base_url.to_string(),
            max_retries: 1,
        })
    }

    /// Lists the spreadsheets directly inside a Drive folder, in API order.
    pub async fn list_spreadsheets(&self, folder_id: &str) -> Result<Vec<DriveFile>, BatonError> {
        let query = format!(
            "'{folder_id}' in parents and mimeType='{SPREADSHEET_MIME_TYPE}' and trashed=false"
        );
        let url = endpoint(&self.drive_base_url, &["files"])?;

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut params = vec![
                ("q", query.as_str()),
                ("spaces", "drive"),
                ("fields", "nextPageToken, files(id, name)"),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }
            let page: FileList = self.send_json(Method::GET, url.clone(), &params).await?;
            files.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        debug!(folder_id, count = files.len(), "listed spreadsheets");
        Ok(files)
    }

    /// Reads every populated row of one worksheet as formatted strings.
    pub async fn read_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
    ) -> Result<Vec<Vec<String>>, BatonError> {
        let url = endpoint(
            &self.sheets_base_url,
            &["spreadsheets", spreadsheet_id, "values", worksheet],
        )?;
        let range: ValueRange = self
            .send_json(
                Method::GET,
                url,
                &[("majorDimension", "ROWS"), ("valueRenderOption", "FORMATTED_VALUE")],
            )
            .await?;
        Ok(range.values)
    }

    /// Current parent folders of a Drive file.
    pub async fn parents(&self, file_id: &str) -> Result<Vec<String>, BatonError> {
        let url = endpoint(&self.drive_base_url, &["files", file_id])?;
        let file: FileParents = self
            .send_json(Method::GET, url, &[("fields", "parents")])
            .await?;
        Ok(file.parents)
    }

    /// Re-parents a Drive file: adds `add_parent` and removes `remove_parents`.
    pub async fn move_file(
        &self,
        file_id: &str,
        add_parent: &str,
        remove_parents: &[String],
    ) -> Result<(), BatonError> {
        let url = endpoint(&self.drive_base_url, &["files", file_id])?;
        let remove = remove_parents.join(",");
        let _: FileParents = self
            .send_json(
                Method::PATCH,
                url,
                &[
                    ("addParents", add_parent),
                    ("removeParents", remove.as_str()),
                    ("fields", "id, parents"),
                ],
            )
            .await?;
        Ok(())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, BatonError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, %method, %url, "retrying Google request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let mut request = self.client.request(method.clone(), url.clone()).query(query);
            if method == Method::PATCH {
                request = request.json(&serde_json::json!({}));
            }

            let response = request.send().await.map_err(|e| BatonError::Transport {
                service: SERVICE,
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

            let status = response.status();
            debug!(status = %status, %method, %url, attempt, "Google response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| BatonError::Transport {
                    service: SERVICE,
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| BatonError::Transport {
                    service: SERVICE,
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            let text = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %text, "transient error, will retry");
                last_error = Some(remote_error(status, &text));
                continue;
            }

            // Non-transient error or exhausted retries.
            return Err(remote_error(status, &text));
        }

        Err(last_error.unwrap_or_else(|| {
            BatonError::Internal("Google request failed after retries".into())
        }))
    }

    /// Overrides the retry count (for testing with wiremock).
    #[cfg(test)]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Appends percent-encoded path segments to a base URL.
fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, BatonError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| BatonError::Config(format!("invalid Google base URL `{base_url}`: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| BatonError::Config(format!("Google base URL `{base_url}` cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn remote_error(status: reqwest::StatusCode, text: &str) -> BatonError {
    let body = match serde_json::from_str::<ApiErrorResponse>(text) {
        Ok(api_err) => match api_err.error.status {
            Some(kind) => format!("{kind}: {}", api_err.error.message),
            None => api_err.error.message,
        },
        Err(_) => text.to_string(),
    };
    BatonError::RemoteApi {
        service: SERVICE,
        status_code: status.as_u16(),
        body,
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}
