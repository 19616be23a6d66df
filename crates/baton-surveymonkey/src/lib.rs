// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SurveyMonkey adapter for the Baton survey scheduler.
//!
//! This crate implements [`SurveyPlatform`] over the SurveyMonkey v3 REST
//! API: template cloning, email collectors, invite and reminder messages,
//! and collector recipients.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use baton_config::BatonConfig;
use baton_core::timestamp::{format_utc, parse_utc};
use baton_core::{
    BatonError, Collector, CollectorId, MessageId, MessageKind, MessageSummary, RecipientId,
    RecipientSummary, SurveyId, SurveyPlatform,
};
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::client::SurveyMonkeyClient;
use crate::types::{
    BulkRecipientsRequest, CollectorItem, Contact, CreateCollectorRequest, CreateMessageRequest,
    CreateSurveyRequest, Created, MessageItem, RecipientItem, ScheduleRequest, SurveyItem,
};

/// Environment variable consulted when the config carries no token.
pub const ACCESS_TOKEN_ENV: &str = "SURVEYMONKEY_ACCESS_TOKEN";

/// Largest page size the listing endpoints accept.
const PER_PAGE: &str = "1000";

/// SurveyMonkey implementation of [`SurveyPlatform`].
///
/// Access token resolution order: config -> `SURVEYMONKEY_ACCESS_TOKEN` env var -> error.
pub struct SurveyMonkeyPlatform {
    client: SurveyMonkeyClient,
}

impl SurveyMonkeyPlatform {
    /// Creates the platform adapter from the given configuration.
    pub fn new(config: &BatonConfig) -> Result<Self, BatonError> {
        let token = resolve_access_token(&config.surveymonkey.access_token)?;
        let client = SurveyMonkeyClient::new(
            &token,
            &config.surveymonkey.base_url,
            config.surveymonkey.max_retries,
            Duration::from_secs(config.surveymonkey.timeout_secs),
        )?;

        info!(
            base_url = %config.surveymonkey.base_url,
            max_retries = config.surveymonkey.max_retries,
            "SurveyMonkey platform initialized"
        );
        Ok(Self { client })
    }

    /// Wraps an already-built client.
    pub fn with_client(client: SurveyMonkeyClient) -> Self {
        Self { client }
    }

    async fn create_message(
        &self,
        collector_id: &CollectorId,
        request: CreateMessageRequest<'_>,
    ) -> Result<MessageId, BatonError> {
        let kind = request.kind;
        let created: Created = self
            .client
            .post_json(&format!("/collectors/{collector_id}/messages"), &request)
            .await?;
        debug!(collector_id = %collector_id, message_id = %created.id, kind = %kind, "message created");
        Ok(MessageId(created.id))
    }
}

#[async_trait]
impl SurveyPlatform for SurveyMonkeyPlatform {
    fn name(&self) -> &str {
        "surveymonkey"
    }

    async fn find_survey_by_name(&self, name: &str) -> Result<Option<SurveyId>, BatonError> {
        // The title filter is a substring search; only an exact title counts.
        let surveys: Vec<SurveyItem> = self
            .client
            .get_all("/surveys", &[("title", name), ("per_page", PER_PAGE)])
            .await?;
        Ok(surveys
            .into_iter()
            .find(|s| s.title == name)
            .map(|s| SurveyId(s.id)))
    }

    async fn clone_survey(&self, template_id: &str, new_name: &str) -> Result<SurveyId, BatonError> {
        let created: Created = self
            .client
            .post_json(
                "/surveys",
                &CreateSurveyRequest {
                    title: new_name,
                    from_survey_id: template_id,
                },
            )
            .await?;
        Ok(SurveyId(created.id))
    }

    async fn find_collector_by_name(
        &self,
        survey_id: &SurveyId,
        name: &str,
    ) -> Result<Option<Collector>, BatonError> {
        let collectors: Vec<CollectorItem> = self
            .client
            .get_all(
                &format!("/surveys/{survey_id}/collectors"),
                &[("name", name), ("include", "url,close_date"), ("per_page", PER_PAGE)],
            )
            .await?;

        let Some(found) = collectors.into_iter().find(|c| c.name == name) else {
            return Ok(None);
        };
        let close_at = match found.close_date.as_deref().map(parse_utc) {
            Some(Ok(close_at)) => Some(close_at),
            Some(Err(e)) => {
                warn!(collector_id = %found.id, error = %e, "unreadable collector close date");
                None
            }
            None => None,
        };
        Ok(Some(Collector {
            id: CollectorId(found.id),
            url: found.url,
            close_at,
        }))
    }

    async fn create_collector(
        &self,
        survey_id: &SurveyId,
        name: &str,
        close_at: DateTime<Utc>,
    ) -> Result<Collector, BatonError> {
        let created: Created = self
            .client
            .post_json(
                &format!("/surveys/{survey_id}/collectors"),
                &CreateCollectorRequest {
                    collector_type: "email",
                    name,
                    close_date: format_utc(&close_at),
                },
            )
            .await?;
        Ok(Collector {
            id: CollectorId(created.id),
            url: created.url,
            close_at: Some(close_at),
        })
    }

    async fn list_messages(
        &self,
        collector_id: &CollectorId,
    ) -> Result<Vec<MessageSummary>, BatonError> {
        let items: Vec<MessageItem> = self
            .client
            .get_all(
                &format!("/collectors/{collector_id}/messages"),
                &[("per_page", PER_PAGE)],
            )
            .await?;

        let mut messages = Vec::with_capacity(items.len());
        for item in items {
            let kind = match item.kind {
                Some(kind) => kind,
                None => {
                    let detail: MessageItem = self
                        .client
                        .get_json(&format!("/collectors/{collector_id}/messages/{}", item.id))
                        .await?;
                    detail.kind.unwrap_or(MessageKind::Other)
                }
            };
            messages.push(MessageSummary {
                id: MessageId(item.id),
                kind,
            });
        }
        Ok(messages)
    }

    async fn create_invite_message(
        &self,
        collector_id: &CollectorId,
        subject: &str,
        body: &str,
    ) -> Result<MessageId, BatonError> {
        self.create_message(collector_id, CreateMessageRequest::invite(subject, body))
            .await
    }

    async fn create_reminder_message(
        &self,
        collector_id: &CollectorId,
        subject: &str,
        body: &str,
    ) -> Result<MessageId, BatonError> {
        self.create_message(collector_id, CreateMessageRequest::reminder(subject, body))
            .await
    }

    async fn schedule_message(
        &self,
        collector_id: &CollectorId,
        message_id: &MessageId,
        send_at: DateTime<Utc>,
    ) -> Result<(), BatonError> {
        self.client
            .post_discard(
                &format!("/collectors/{collector_id}/messages/{message_id}/send"),
                &ScheduleRequest {
                    scheduled_date: format_utc(&send_at),
                },
            )
            .await
    }

    async fn list_recipients(
        &self,
        collector_id: &CollectorId,
    ) -> Result<Vec<RecipientSummary>, BatonError> {
        let items: Vec<RecipientItem> = self
            .client
            .get_all(
                &format!("/collectors/{collector_id}/recipients"),
                &[("include", "email"), ("per_page", PER_PAGE)],
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|r| RecipientSummary {
                id: RecipientId(r.id),
                email: r.email,
            })
            .collect())
    }

    async fn add_recipients(
        &self,
        collector_id: &CollectorId,
        message_id: &MessageId,
        emails: &[String],
    ) -> Result<(), BatonError> {
        let request = BulkRecipientsRequest {
            contacts: emails.iter().map(|email| Contact { email }).collect(),
        };
        self.client
            .post_discard(
                &format!("/collectors/{collector_id}/messages/{message_id}/recipients/bulk"),
                &request,
            )
            .await
    }

    async fn delete_recipient(
        &self,
        collector_id: &CollectorId,
        recipient_id: &RecipientId,
    ) -> Result<(), BatonError> {
        self.client
            .delete(&format!("/collectors/{collector_id}/recipients/{recipient_id}"))
            .await
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
                "SurveyMonkey access token not found. Set surveymonkey.access_token in config or {ACCESS_TOKEN_ENV} environment variable."
            ))
        })
}
