// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SurveyMonkey adapter behavior against a mock HTTP server.

use std::time::Duration;

use baton_config::BatonConfig;
use baton_core::{CollectorId, MessageId, MessageKind, RecipientId, SurveyId, SurveyPlatform};
use baton_surveymonkey::SurveyMonkeyPlatform;
use baton_surveymonkey::client::SurveyMonkeyClient;
use chrono::{TimeZone, Utc};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn platform(server: &MockServer) -> SurveyMonkeyPlatform {
    let mut config = BatonConfig::default();
    config.surveymonkey.access_token = Some("sm-token".into());
    config.surveymonkey.base_url = server.uri();
    config.surveymonkey.max_retries = 0;
    SurveyMonkeyPlatform::new(&config).unwrap()
}

#[tokio::test]
async fn find_survey_requires_exact_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/surveys"))
        .and(query_param("title", "Conductor Evaluation for Jane Doe (SUB 9)"))
        .and(query_param("per_page", "1000"))
        .and(header("authorization", "Bearer sm-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "10", "title": "Conductor Evaluation for Jane Doe (SUB 9) copy"},
                {"id": "11", "title": "Conductor Evaluation for Jane Doe (SUB 9)"}
            ],
            "links": {}
        })))
        .mount(&server)
        .await;

    let found = platform(&server)
        .find_survey_by_name("Conductor Evaluation for Jane Doe (SUB 9)")
        .await
        .unwrap();
    assert_eq!(found, Some(SurveyId::from("11")));
}

#[tokio::test]
async fn find_survey_returns_none_when_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/surveys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let found = platform(&server).find_survey_by_name("nope").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn clone_survey_posts_template_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/surveys"))
        .and(body_json(json!({"title": "New", "from_survey_id": "tmpl-1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "99", "title": "New"})))
        .expect(1)
        .mount(&server)
        .await;

    let id = platform(&server).clone_survey("tmpl-1", "New").await.unwrap();
    assert_eq!(id, SurveyId::from("99"));
}

#[tokio::test]
async fn prebuilt_client_retries_through_the_platform() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/surveys"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/surveys"))
        .and(header("authorization", "Bearer prebuilt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "7", "title": "Tosca"}],
            "links": {}
        })))
        .mount(&server)
        .await;

    let client = SurveyMonkeyClient::new(
        &SecretString::from("prebuilt"),
        &server.uri(),
        1,
        Duration::from_secs(5),
    )
    .unwrap();
    let found = SurveyMonkeyPlatform::with_client(client)
        .find_survey_by_name("Tosca")
        .await
        .unwrap();
    assert_eq!(found, Some(SurveyId::from("7")));
}

#[tokio::test]
async fn create_collector_sends_email_type_and_close_date() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/surveys/99/collectors"))
        .and(body_json(json!({
            "type": "email",
            "name": "Email Invitation for Jane Doe (SUB 9)",
            "close_date": "2025-09-25T04:40:00Z"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "c1",
            "url": "https://www.surveymonkey.com/r/ABC"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let close_at = Utc.with_ymd_and_hms(2025, 9, 25, 4, 40, 0).unwrap();
    let collector = platform(&server)
        .create_collector(
            &SurveyId::from("99"),
            "Email Invitation for Jane Doe (SUB 9)",
            close_at,
        )
        .await
        .unwrap();
    assert_eq!(collector.id, CollectorId::from("c1"));
    assert_eq!(collector.url.as_deref(), Some("https://www.surveymonkey.com/r/ABC"));
}

#[tokio::test]
async fn find_collector_matches_name_exactly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/surveys/99/collectors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "c0", "name": "Web Link 1"},
                {"id": "c1", "name": "Email Invitation for Jane Doe (SUB 9)",
                 "url": "https://www.surveymonkey.com/r/ABC",
                 "close_date": "2025-09-25T04:40:00+00:00"}
            ]
        })))
        .mount(&server)
        .await;

    let collector = platform(&server)
        .find_collector_by_name(&SurveyId::from("99"), "Email Invitation for Jane Doe (SUB 9)")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(collector.id, CollectorId::from("c1"));
    assert_eq!(
        collector.close_at,
        Some(Utc.with_ymd_and_hms(2025, 9, 25, 4, 40, 0).unwrap())
    );
}

#[tokio::test]
async fn list_messages_fetches_missing_kinds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collectors/c1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "m1", "type": "invite"},
                {"id": "m2"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collectors/c1/messages/m2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m2", "type": "reminder"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let messages = platform(&server)
        .list_messages(&CollectorId::from("c1"))
        .await
        .unwrap();
    let kinds: Vec<_> = messages.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![MessageKind::Invite, MessageKind::Reminder]);
}

#[tokio::test]
async fn reminder_message_targets_non_responders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/collectors/c1/messages"))
        .and(body_json(json!({
            "type": "reminder",
            "subject": "Reminder",
            "body_html": "Body",
            "recipient_status": "has_not_responded"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "m2"})))
        .expect(1)
        .mount(&server)
        .await;

    let id = platform(&server)
        .create_reminder_message(&CollectorId::from("c1"), "Reminder", "Body")
        .await
        .unwrap();
    assert_eq!(id, MessageId::from("m2"));
}

#[tokio::test]
async fn schedule_message_sends_utc_with_z() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/collectors/c1/messages/m1/send"))
        .and(body_json(json!({"scheduled_date": "2025-09-17T04:40:00Z"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "m1"})))
        .expect(1)
        .mount(&server)
        .await;

    let send_at = Utc.with_ymd_and_hms(2025, 9, 17, 4, 40, 0).unwrap();
    platform(&server)
        .schedule_message(&CollectorId::from("c1"), &MessageId::from("m1"), send_at)
        .await
        .unwrap();
}

#[tokio::test]
async fn recipients_are_listed_added_and_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collectors/c1/recipients"))
        .and(query_param("include", "email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "r1", "email": "a@x.com"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/collectors/c1/messages/m1/recipients/bulk"))
        .and(body_json(json!({"contacts": [{"email": "b@x.com"}, {"email": "c@x.com"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"succeeded": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/collectors/c1/recipients/r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let platform = platform(&server);
    let collector = CollectorId::from("c1");
    let recipients = platform.list_recipients(&collector).await.unwrap();
    assert_eq!(recipients.len(), 1);
    assert_eq!(recipients[0].email, "a@x.com");

    platform
        .add_recipients(
            &collector,
            &MessageId::from("m1"),
            &["b@x.com".to_string(), "c@x.com".to_string()],
        )
        .await
        .unwrap();
    platform
        .delete_recipient(&collector, &RecipientId::from("r1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn not_found_surfaces_as_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collectors/gone/recipients"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"id": "1020", "name": "Resource Not Found", "message": "There was an error retrieving the requested resource."}
        })))
        .mount(&server)
        .await;

    let err = platform(&server)
        .list_recipients(&CollectorId::from("gone"))
        .await
        .unwrap_err();
    assert!(err.is_remote());
    assert_eq!(err.status_code(), Some(404));
}
