// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock survey platform for deterministic testing.
//!
//! `MockSurveyPlatform` keeps surveys, collectors, messages, and recipients in
//! memory and behaves like the real platform where the engine depends on it:
//! names are not unique (creating twice really creates twice), adding an
//! email that is already a recipient is a no-op, and scheduling overwrites.
//! Every call is appended to a log, and any operation can be made to fail.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use baton_core::{
    BatonError, Collector, CollectorId, MessageId, MessageKind, MessageSummary, RecipientId,
    RecipientSummary, SurveyId, SurveyPlatform,
};

/// A survey held by the mock platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSurvey {
    pub id: SurveyId,
    pub title: String,
    /// Template this survey was cloned from, if it was cloned.
    pub template_id: Option<String>,
}

/// A collector held by the mock platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCollector {
    pub id: CollectorId,
    pub survey_id: SurveyId,
    pub name: String,
    pub close_at: DateTime<Utc>,
}

/// A message held by the mock platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMessage {
    pub id: MessageId,
    pub collector_id: CollectorId,
    pub kind: MessageKind,
    pub subject: String,
    pub body: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// A recipient held by the mock platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRecipient {
    pub id: RecipientId,
    pub collector_id: CollectorId,
    pub message_id: Option<MessageId>,
    pub email: String,
}

#[derive(Default)]
struct State {
    next_id: u64,
    surveys: Vec<MockSurvey>,
    collectors: Vec<MockCollector>,
    messages: Vec<MockMessage>,
    recipients: Vec<MockRecipient>,
    calls: Vec<String>,
    failing: HashSet<String>,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Logs the call and fails it if it was marked as failing.
    fn enter(&mut self, operation: &str) -> Result<(), BatonError> {
        self.calls.push(operation.to_string());
        if self.failing.contains(operation) {
            return Err(BatonError::RemoteApi {
                service: "mock-survey-platform",
                status_code: 500,
                body: format!("{operation} failed"),
            });
        }
        Ok(())
    }

    fn collector_exists(&self, collector_id: &CollectorId) -> Result<(), BatonError> {
        if self.collectors.iter().any(|c| &c.id == collector_id) {
            Ok(())
        } else {
            Err(BatonError::RemoteApi {
                service: "mock-survey-platform",
                status_code: 404,
                body: format!("collector {collector_id} not found"),
            })
        }
    }

    fn add_message(
        &mut self,
        collector_id: &CollectorId,
        kind: MessageKind,
        subject: &str,
        body: &str,
    ) -> MessageId {
        let id = MessageId(self.next_id("message"));
        self.messages.push(MockMessage {
            id: id.clone(),
            collector_id: collector_id.clone(),
            kind,
            subject: subject.to_string(),
            body: body.to_string(),
            scheduled_at: None,
        });
        id
    }

    fn add_recipient(
        &mut self,
        collector_id: &CollectorId,
        message_id: Option<&MessageId>,
        email: &str,
    ) {
        let exists = self
            .recipients
            .iter()
            .any(|r| &r.collector_id == collector_id && r.email.eq_ignore_ascii_case(email));
        if exists {
            return;
        }
        let id = RecipientId(self.next_id("recipient"));
        self.recipients.push(MockRecipient {
            id,
            collector_id: collector_id.clone(),
            message_id: message_id.cloned(),
            email: email.to_string(),
        });
    }
}

/// An in-memory survey platform.
#[derive(Clone, Default)]
pub struct MockSurveyPlatform {
    state: Arc<Mutex<State>>,
}

impl MockSurveyPlatform {
    /// Create an empty platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of `operation` (a trait method name) fail with HTTP 500.
    pub async fn fail_on(&self, operation: &str) {
        self.state.lock().await.failing.insert(operation.to_string());
    }

    /// Stop failing `operation`.
    pub async fn recover(&self, operation: &str) {
        self.state.lock().await.failing.remove(operation);
    }

    /// Seed an existing survey.
    pub async fn seed_survey(&self, title: &str) -> SurveyId {
        let mut state = self.state.lock().await;
        let id = SurveyId(state.next_id("survey"));
        state.surveys.push(MockSurvey {
            id: id.clone(),
            title: title.to_string(),
            template_id: None,
        });
        id
    }

    /// Seed an existing collector.
    pub async fn seed_collector(
        &self,
        survey_id: &SurveyId,
        name: &str,
        close_at: DateTime<Utc>,
    ) -> CollectorId {
        let mut state = self.state.lock().await;
        let id = CollectorId(state.next_id("collector"));
        state.collectors.push(MockCollector {
            id: id.clone(),
            survey_id: survey_id.clone(),
            name: name.to_string(),
            close_at,
        });
        id
    }

    /// Seed an existing message.
    pub async fn seed_message(&self, collector_id: &CollectorId, kind: MessageKind) -> MessageId {
        self.state
            .lock()
            .await
            .add_message(collector_id, kind, "seeded", "seeded")
    }

    /// Seed an existing recipient.
    pub async fn seed_recipient(&self, collector_id: &CollectorId, email: &str) {
        self.state
            .lock()
            .await
            .add_recipient(collector_id, None, email);
    }

    pub async fn surveys(&self) -> Vec<MockSurvey> {
        self.state.lock().await.surveys.clone()
    }

    pub async fn collectors(&self) -> Vec<MockCollector> {
        self.state.lock().await.collectors.clone()
    }

    pub async fn messages(&self) -> Vec<MockMessage> {
        self.state.lock().await.messages.clone()
    }

    /// Recipient emails on a collector, sorted.
    pub async fn recipient_emails(&self, collector_id: &CollectorId) -> Vec<String> {
        let mut emails: Vec<String> = self
            .state
            .lock()
            .await
            .recipients
            .iter()
            .filter(|r| &r.collector_id == collector_id)
            .map(|r| r.email.clone())
            .collect();
        emails.sort();
        emails
    }

    /// Names of every trait method called so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls to `operation`.
    pub async fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }
}

#[async_trait]
impl SurveyPlatform for MockSurveyPlatform {
    fn name(&self) -> &str {
        "mock-survey-platform"
    }

    async fn find_survey_by_name(&self, name: &str) -> Result<Option<SurveyId>, BatonError> {
        let mut state = self.state.lock().await;
        state.enter("find_survey_by_name")?;
        Ok(state
            .surveys
            .iter()
            .find(|s| s.title == name)
            .map(|s| s.id.clone()))
    }

    async fn clone_survey(&self, template_id: &str, new_name: &str) -> Result<SurveyId, BatonError> {
        let mut state = self.state.lock().await;
        state.enter("clone_survey")?;
        let id = SurveyId(state.next_id("survey"));
        state.surveys.push(MockSurvey {
            id: id.clone(),
            title: new_name.to_string(),
            template_id: Some(template_id.to_string()),
        });
        Ok(id)
    }

    async fn find_collector_by_name(
        &self,
        survey_id: &SurveyId,
        name: &str,
    ) -> Result<Option<Collector>, BatonError> {
        let mut state = self.state.lock().await;
        state.enter("find_collector_by_name")?;
        Ok(state
            .collectors
            .iter()
            .find(|c| &c.survey_id == survey_id && c.name == name)
            .map(|c| Collector {
                id: c.id.clone(),
                url: Some(format!("https://surveys.test/r/{}", c.id)),
                close_at: Some(c.close_at),
            }))
    }

    async fn create_collector(
        &self,
        survey_id: &SurveyId,
        name: &str,
        close_at: DateTime<Utc>,
    ) -> Result<Collector, BatonError> {
        let mut state = self.state.lock().await;
        state.enter("create_collector")?;
        let id = CollectorId(state.next_id("collector"));
        state.collectors.push(MockCollector {
            id: id.clone(),
            survey_id: survey_id.clone(),
            name: name.to_string(),
            close_at,
        });
        Ok(Collector {
            url: Some(format!("https://surveys.test/r/{id}")),
            id,
            close_at: Some(close_at),
        })
    }

    async fn list_messages(
        &self,
        collector_id: &CollectorId,
    ) -> Result<Vec<MessageSummary>, BatonError> {
        let mut state = self.state.lock().await;
        state.enter("list_messages")?;
        state.collector_exists(collector_id)?;
        Ok(state
            .messages
            .iter()
            .filter(|m| &m.collector_id == collector_id)
            .map(|m| MessageSummary {
                id: m.id.clone(),
                kind: m.kind,
            })
            .collect())
    }

    async fn create_invite_message(
        &self,
        collector_id: &CollectorId,
        subject: &str,
        body: &str,
    ) -> Result<MessageId, BatonError> {
        let mut state = self.state.lock().await;
        state.enter("create_invite_message")?;
        state.collector_exists(collector_id)?;
        Ok(state.add_message(collector_id, MessageKind::Invite, subject, body))
    }

    async fn create_reminder_message(
        &self,
        collector_id: &CollectorId,
        subject: &str,
        body: &str,
    ) -> Result<MessageId, BatonError> {
        let mut state = self.state.lock().await;
        state.enter("create_reminder_message")?;
        state.collector_exists(collector_id)?;
        Ok(state.add_message(collector_id, MessageKind::Reminder, subject, body))
    }

    async fn schedule_message(
        &self,
        collector_id: &CollectorId,
        message_id: &MessageId,
        send_at: DateTime<Utc>,
    ) -> Result<(), BatonError> {
        let mut state = self.state.lock().await;
        state.enter("schedule_message")?;
        let message = state
            .messages
            .iter_mut()
            .find(|m| &m.collector_id == collector_id && &m.id == message_id)
            .ok_or_else(|| BatonError::RemoteApi {
                service: "mock-survey-platform",
                status_code: 404,
                body: format!("message {message_id} not found"),
            })?;
        message.scheduled_at = Some(send_at);
        Ok(())
    }

    async fn list_recipients(
        &self,
        collector_id: &CollectorId,
    ) -> Result<Vec<RecipientSummary>, BatonError> {
        let mut state = self.state.lock().await;
        state.enter("list_recipients")?;
        state.collector_exists(collector_id)?;
        Ok(state
            .recipients
            .iter()
            .filter(|r| &r.collector_id == collector_id)
            .map(|r| RecipientSummary {
                id: r.id.clone(),
                email: r.email.clone(),
            })
            .collect())
    }

    async fn add_recipients(
        &self,
        collector_id: &CollectorId,
        message_id: &MessageId,
        emails: &[String],
    ) -> Result<(), BatonError> {
        let mut state = self.state.lock().await;
        state.enter("add_recipients")?;
        state.collector_exists(collector_id)?;
        for email in emails {
            state.add_recipient(collector_id, Some(message_id), email);
        }
        Ok(())
    }

    async fn delete_recipient(
        &self,
        collector_id: &CollectorId,
        recipient_id: &RecipientId,
    ) -> Result<(), BatonError> {
        let mut state = self.state.lock().await;
        state.enter("delete_recipient")?;
        let before = state.recipients.len();
        state
            .recipients
            .retain(|r| !(&r.collector_id == collector_id && &r.id == recipient_id));
        if state.recipients.len() == before {
            return Err(BatonError::RemoteApi {
                service: "mock-survey-platform",
                status_code: 404,
                body: format!("recipient {recipient_id} not found"),
            });
        }
        Ok(())
    }
}
