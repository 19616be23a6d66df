// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `baton run` command: one reconciliation pass over all pending rosters.

use std::fmt::Write as _;
use std::sync::Arc;

use baton_config::BatonConfig;
use baton_core::{BatonError, RosterSource, SurveyPlatform};
use baton_reconcile::{ReconcileSettings, Reconciler, RosterOutcome, RunSummary};
use baton_sheets::GoogleRosterSource;
use baton_surveymonkey::SurveyMonkeyPlatform;

/// Builds the remote adapters from configuration and runs one pass.
pub async fn run_once(config: &BatonConfig) -> Result<RunSummary, BatonError> {
    let settings = ReconcileSettings::from_config(config)?;
    let roster_source: Arc<dyn RosterSource> = Arc::new(GoogleRosterSource::new(config)?);
    let platform: Arc<dyn SurveyPlatform> = Arc::new(SurveyMonkeyPlatform::new(config)?);
    run_with(roster_source, platform, settings).await
}

/// Runs one pass over already-constructed adapters.
pub async fn run_with(
    roster_source: Arc<dyn RosterSource>,
    platform: Arc<dyn SurveyPlatform>,
    settings: ReconcileSettings,
) -> Result<RunSummary, BatonError> {
    Reconciler::new(roster_source, platform, settings)
        .run_pass()
        .await
}

/// One line per roster followed by the totals.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    for (file, outcome) in &summary.outcomes {
        let _ = match outcome {
            RosterOutcome::Processed(done) => writeln!(
                out,
                "processed  {}  {}",
                file.name,
                done.collector_url.as_deref().unwrap_or("(no collector url)")
            ),
            RosterOutcome::Skipped { problems } => {
                writeln!(out, "skipped    {}  {}", file.name, problems.join("; "))
            }
            RosterOutcome::Failed { error } => writeln!(out, "failed     {}  {error}", file.name),
        };
    }
    let _ = write!(out, "{summary}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use baton_core::RosterDraft;
    use baton_reconcile::{MessageWording, ScheduleRules, SurveyTemplates};
    use baton_test_utils::{MockRosterSource, MockSurveyPlatform};
    use tracing_test::traced_test;

    fn settings() -> ReconcileSettings {
        ReconcileSettings {
            templates: SurveyTemplates {
                sso: "t-sso".into(),
                seattle_opera: "t-opera".into(),
            },
            schedule: ScheduleRules::default(),
            wording: MessageWording {
                invite_subject: "{title}".into(),
                invite_body: "{conductor}".into(),
                reminder_subject: "{title}".into(),
                reminder_body: "{conductor}".into(),
            },
            standing_recipients: Vec::new(),
        }
    }

    #[tokio::test]
    async fn run_with_reports_each_roster() {
        let source = MockRosterSource::new();
        source
            .add_roster(
                "f1",
                "good",
                RosterDraft {
                    event_title: Some("SUB 9".into()),
                    conductor_name: Some("Jane Doe".into()),
                    event_local_timestamp: Some("2099-09-16 20:00".into()),
                    recipient_emails: vec!["a@x.com".into()],
                },
            )
            .await;
        source.add_roster("f2", "empty", RosterDraft::default()).await;

        let summary = run_with(
            Arc::new(source.clone()),
            Arc::new(MockSurveyPlatform::new()),
            settings(),
        )
        .await
        .unwrap();

        let text = render_summary(&summary);
        assert!(text.contains("processed  good  https://surveys.test/r/"), "got: {text}");
        assert!(text.contains("skipped    empty  roster lists no recipients"), "got: {text}");
        assert!(text.ends_with("2 roster(s): 1 processed, 1 skipped, 0 failed"));
    }

    #[tokio::test]
    #[traced_test]
    async fn pass_start_is_logged_once() {
        run_with(
            Arc::new(MockRosterSource::new()),
            Arc::new(MockSurveyPlatform::new()),
            settings(),
        )
        .await
        .unwrap();

        logs_assert(|lines: &[&str]| {
            let starts = lines
                .iter()
                .filter(|line| line.contains("starting reconciliation pass"))
                .count();
            match starts {
                1 => Ok(()),
                n => Err(format!("expected one pass start event, saw {n}")),
            }
        });
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_call() {
        let mut config = BatonConfig::default();
        config.google.access_token = None;
        config.surveymonkey.access_token = None;
        if std::env::var(baton_sheets::ACCESS_TOKEN_ENV).is_ok() {
            return;
        }
        let err = run_once(&config).await.unwrap_err();
        assert!(matches!(err, BatonError::Config(_)), "got: {err}");
    }
}
