// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SurveyMonkey v3 request/response types.

use baton_core::MessageKind;
use serde::{Deserialize, Serialize};

// --- Listing envelopes ---

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub links: Links,
}

/// Pagination links. `next` is an absolute URL when another page exists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

// --- Listing items ---

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Present when requested with `include=url`.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub close_date: Option<String>,
}

/// A collector message. Some listings omit `type`; the detail endpoint
/// always carries it.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageItem {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<MessageKind>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipientItem {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// Response body of any create call.
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

// --- Requests ---

#[derive(Debug, Clone, Serialize)]
pub struct CreateSurveyRequest<'a> {
    pub title: &'a str,
    pub from_survey_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCollectorRequest<'a> {
    #[serde(rename = "type")]
    pub collector_type: &'static str,
    pub name: &'a str,
    pub close_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest<'a> {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub subject: &'a str,
    pub body_html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_first_question: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_status: Option<&'static str>,
}

impl<'a> CreateMessageRequest<'a> {
    /// Invitation carrying the first survey question inline.
    pub fn invite(subject: &'a str, body_html: &'a str) -> Self {
        Self {
            kind: MessageKind::Invite,
            subject,
            body_html,
            embed_first_question: Some(true),
            recipient_status: None,
        }
    }

    /// Reminder addressed only to recipients who have not responded.
    pub fn reminder(subject: &'a str, body_html: &'a str) -> Self {
        Self {
            kind: MessageKind::Reminder,
            subject,
            body_html,
            embed_first_question: None,
            recipient_status: Some("has_not_responded"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRequest {
    pub scheduled_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkRecipientsRequest<'a> {
    pub contacts: Vec<Contact<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Contact<'a> {
    pub email: &'a str,
}

// --- Errors ---

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_request_embeds_first_question() {
        let json = serde_json::to_value(CreateMessageRequest::invite("Subj", "<p>Hi</p>")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "invite",
                "subject": "Subj",
                "body_html": "<p>Hi</p>",
                "embed_first_question": true
            })
        );
    }

    #[test]
    fn reminder_request_targets_non_responders() {
        let json = serde_json::to_value(CreateMessageRequest::reminder("Subj", "Body")).unwrap();
        assert_eq!(json["type"], "reminder");
        assert_eq!(json["recipient_status"], "has_not_responded");
        assert!(json.get("embed_first_question").is_none());
    }

    #[test]
    fn page_without_links_has_no_next() {
        let page: Page<SurveyItem> =
            serde_json::from_str(r#"{"data":[{"id":"1","title":"A"}],"per_page":50}"#).unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(page.links.next.is_none());
    }

    #[test]
    fn message_without_type_decodes() {
        let item: MessageItem = serde_json::from_str(r#"{"id":"m1","href":"x"}"#).unwrap();
        assert!(item.kind.is_none());
        let item: MessageItem =
            serde_json::from_str(r#"{"id":"m2","type":"thank_you"}"#).unwrap();
        assert_eq!(item.kind, Some(MessageKind::Other));
    }
}
