// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Survey platform trait for the remote survey service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::BatonError;
use crate::types::{
    Collector, CollectorId, MessageId, MessageSummary, RecipientId, RecipientSummary, SurveyId,
};

/// Surveys, collectors, messages, and recipients on the survey platform.
///
/// Every method fails with [`BatonError::RemoteApi`] on a non-success HTTP
/// status. Lookups return `Ok(None)` when nothing matches.
#[async_trait]
pub trait SurveyPlatform: Send + Sync {
    /// Returns the human-readable name of this platform.
    fn name(&self) -> &str;

    /// Finds a survey whose title equals `name` exactly.
    async fn find_survey_by_name(&self, name: &str) -> Result<Option<SurveyId>, BatonError>;

    /// Creates a new survey titled `new_name` as a copy of `template_id`.
    async fn clone_survey(
        &self,
        template_id: &str,
        new_name: &str,
    ) -> Result<SurveyId, BatonError>;

    /// Finds a collector on `survey_id` whose name equals `name` exactly.
    async fn find_collector_by_name(
        &self,
        survey_id: &SurveyId,
        name: &str,
    ) -> Result<Option<Collector>, BatonError>;

    /// Creates an email collector that closes at `close_at`.
    async fn create_collector(
        &self,
        survey_id: &SurveyId,
        name: &str,
        close_at: DateTime<Utc>,
    ) -> Result<Collector, BatonError>;

    /// Lists every message on the collector.
    async fn list_messages(
        &self,
        collector_id: &CollectorId,
    ) -> Result<Vec<MessageSummary>, BatonError>;

    /// Creates the invite message. The body embeds the first survey question.
    async fn create_invite_message(
        &self,
        collector_id: &CollectorId,
        subject: &str,
        body: &str,
    ) -> Result<MessageId, BatonError>;

    /// Creates the reminder message, addressed to recipients who have not responded.
    async fn create_reminder_message(
        &self,
        collector_id: &CollectorId,
        subject: &str,
        body: &str,
    ) -> Result<MessageId, BatonError>;

    /// Sets (or resets) the send time of a message.
    async fn schedule_message(
        &self,
        collector_id: &CollectorId,
        message_id: &MessageId,
        send_at: DateTime<Utc>,
    ) -> Result<(), BatonError>;

    /// Lists every recipient on the collector, across all result pages.
    async fn list_recipients(
        &self,
        collector_id: &CollectorId,
    ) -> Result<Vec<RecipientSummary>, BatonError>;

    /// Attaches recipients to a message. Duplicates are ignored by the platform.
    async fn add_recipients(
        &self,
        collector_id: &CollectorId,
        message_id: &MessageId,
        emails: &[String],
    ) -> Result<(), BatonError>;

    /// Removes one recipient from the collector.
    async fn delete_recipient(
        &self,
        collector_id: &CollectorId,
        recipient_id: &RecipientId,
    ) -> Result<(), BatonError>;
}
