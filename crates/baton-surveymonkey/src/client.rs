// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the SurveyMonkey v3 API.
//!
//! Provides [`SurveyMonkeyClient`] which handles bearer authentication,
//! `links.next` pagination, and transient error retry.

use std::time::Duration;

use baton_core::BatonError;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, Page};

const SERVICE: &str = "surveymonkey";

/// Pause between attempts of a transient failure.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP client for SurveyMonkey API communication.
#[derive(Debug, Clone)]
pub struct SurveyMonkeyClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl SurveyMonkeyClient {
    /// Creates a client authenticated with a bearer access token.
    pub fn new(
        access_token: &SecretString,
        base_url: &str,
        max_retries: u32,
        timeout: Duration,
    ) -> Result<Self, BatonError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", access_token.expose_secret()))
            .map_err(|e| {
                BatonError::Config(format!("invalid SurveyMonkey access token header value: {e}"))
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

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
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
        })
    }

    /// Absolute URL for an API path such as `/surveys`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches every item of a paginated listing, following `links.next`.
    ///
    /// `query` applies to the first page only; next links carry their own.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, BatonError> {
        let mut items = Vec::new();
        let mut page: Page<T> = self.get_json_url(&self.url(path), query).await?;
        let mut pages = 1;
        loop {
            items.append(&mut page.data);
            let Some(next) = page.links.next.take() else {
                break;
            };
            page = self.get_json_url(&next, &[]).await?;
            pages += 1;
        }
        debug!(path, pages, items = items.len(), "listing fetched");
        Ok(items)
    }

    /// GET an API path and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BatonError> {
        self.get_json_url(&self.url(path), &[]).await
    }

    /// POST a JSON body to an API path and decode the JSON response.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BatonError> {
        let body = serde_json::to_value(body).map_err(|e| BatonError::Internal(format!(
            "failed to encode SurveyMonkey request body: {e}"
        )))?;
        let text = self
            .execute(Method::POST, &self.url(path), &[], Some(&body))
            .await?;
        decode(&text)
    }

    /// POST a JSON body to an API path, ignoring the response body.
    pub async fn post_discard<B: Serialize>(&self, path: &str, body: &B) -> Result<(), BatonError> {
        let body = serde_json::to_value(body).map_err(|e| BatonError::Internal(format!(
            "failed to encode SurveyMonkey request body: {e}"
        )))?;
        self.execute(Method::POST, &self.url(path), &[], Some(&body))
            .await?;
        Ok(())
    }

    /// DELETE an API path.
    pub async fn delete(&self, path: &str) -> Result<(), BatonError> {
        self.execute(Method::DELETE, &self.url(path), &[], None)
            .await?;
        Ok(())
    }

    async fn get_json_url<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, BatonError> {
        let text = self.execute(Method::GET, url, query, None).await?;
        decode(&text)
    }

    /// Sends one request, retrying transient failures, and returns the body text.
    async fn execute(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<String, BatonError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, %method, url, "retrying SurveyMonkey request after transient error");
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let mut request = self.client.request(method.clone(), url);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await.map_err(|e| BatonError::Transport {
                service: SERVICE,
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

            let status = response.status();
            debug!(status = %status, %method, url, attempt, "SurveyMonkey response received");

            if status.is_success() {
                return response.text().await.map_err(|e| BatonError::Transport {
                    service: SERVICE,
                    message: format!("failed to read response body: {e}"),
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
            BatonError::Internal("SurveyMonkey request failed after retries".into())
        }))
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, BatonError> {
    serde_json::from_str(text).map_err(|e| BatonError::Transport {
        service: SERVICE,
        message: format!("failed to parse API response: {e}"),
        source: Some(Box::new(e)),
    })
}

fn remote_error(status: reqwest::StatusCode, text: &str) -> BatonError {
    let body = match serde_json::from_str::<ApiErrorResponse>(text) {
        Ok(api_err) => match api_err.error.name {
            Some(name) => format!("{name}: {}", api_err.error.message),
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
