// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The reconciliation engine.
//!
//! For each pending roster the engine validates it, resolves the survey, the
//! collector, and its two messages by canonical name (creating only what is
//! absent), syncs the recipient set, (re)schedules both messages, and finally
//! moves the roster to the processed location. Every step converges, so an
//! unchanged roster can be run any number of times without creating
//! duplicates. A roster that fails at any step stays pending for the next run.

use std::collections::HashSet;
use std::sync::Arc;

use baton_core::{
    BatonError, Collector, CollectorId, MessageId, MessageKind, MessageSummary,
    RecipientSummary, RosterFile, RosterRecord, RosterSource, SurveyId, SurveyPlatform,
};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::settings::ReconcileSettings;
use crate::summary::{ReconciledRoster, RosterOutcome, RunSummary};
use crate::template::{TemplateFamily, collector_name, render_wording, survey_name};
use crate::time::ScheduleTimes;
use crate::validator::{into_validation_error, validate_roster};

/// Invite and reminder ids on a collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorMessages {
    pub invite: MessageId,
    pub reminder: MessageId,
}

/// Recipient changes needed to make a collector match its target set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientPlan {
    pub delete: Vec<RecipientSummary>,
    pub add: Vec<String>,
}

/// Computes the recipient delta. Emails compare case-insensitively.
pub fn plan_recipient_sync(current: &[RecipientSummary], target: &[String]) -> RecipientPlan {
    let target_keys: HashSet<String> = target.iter().map(|e| email_key(e)).collect();
    let current_keys: HashSet<String> = current.iter().map(|r| email_key(&r.email)).collect();

    RecipientPlan {
        delete: current
            .iter()
            .filter(|r| !target_keys.contains(&email_key(&r.email)))
            .cloned()
            .collect(),
        add: target
            .iter()
            .filter(|e| !current_keys.contains(&email_key(e)))
            .cloned()
            .collect(),
    }
}

/// Roster emails followed by standing recipients, deduplicated in order.
pub fn target_recipients(record: &RosterRecord, standing: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    record
        .recipient_emails
        .iter()
        .chain(standing)
        .map(|e| e.trim())
        .filter(|e| !e.is_empty() && seen.insert(email_key(e)))
        .map(str::to_string)
        .collect()
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Reconciles pending rosters against the survey platform.
pub struct Reconciler {
    roster_source: Arc<dyn RosterSource>,
    platform: Arc<dyn SurveyPlatform>,
    settings: ReconcileSettings,
}

impl Reconciler {
    /// Creates a reconciler over already-constructed remote handles.
    pub fn new(
        roster_source: Arc<dyn RosterSource>,
        platform: Arc<dyn SurveyPlatform>,
        settings: ReconcileSettings,
    ) -> Self {
        Self {
            roster_source,
            platform,
            settings,
        }
    }

    /// Runs one pass at the current instant.
    pub async fn run_pass(&self) -> Result<RunSummary, BatonError> {
        self.run_pass_at(Utc::now()).await
    }

    /// Runs one pass, judging event dates against `now`.
    ///
    /// Only a failure to list pending rosters is returned as an error; every
    /// per-roster failure is recorded in the summary and the pass moves on.
    pub async fn run_pass_at(&self, now: DateTime<Utc>) -> Result<RunSummary, BatonError> {
        let pending = self.roster_source.list_pending().await?;
        info!(
            source = self.roster_source.name(),
            platform = self.platform.name(),
            count = pending.len(),
            "starting reconciliation pass"
        );

        let mut summary = RunSummary::default();
        for file in pending {
            let outcome = match self.reconcile_roster(&file, now).await {
                Ok(done) => {
                    info!(
                        file_id = %file.id,
                        file_name = %file.name,
                        survey_id = %done.survey_id,
                        collector_id = %done.collector_id,
                        url = done.collector_url.as_deref().unwrap_or("-"),
                        "roster processed"
                    );
                    RosterOutcome::Processed(done)
                }
                Err(BatonError::ValidationFailed { problems }) => {
                    warn!(
                        file_id = %file.id,
                        file_name = %file.name,
                        problems = ?problems,
                        "roster skipped"
                    );
                    RosterOutcome::Skipped { problems }
                }
                Err(e) => {
                    error!(
                        file_id = %file.id,
                        file_name = %file.name,
                        error = %e,
                        "roster failed; left pending"
                    );
                    RosterOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            summary.record(file, outcome);
        }

        info!(
            processed = summary.processed(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "reconciliation pass finished"
        );
        Ok(summary)
    }

    /// Reconciles one roster end to end. Marking it processed is the last step.
    pub async fn reconcile_roster(
        &self,
        file: &RosterFile,
        now: DateTime<Utc>,
    ) -> Result<ReconciledRoster, BatonError> {
        let draft = self.roster_source.read(&file.id).await?;
        let record = validate_roster(&draft, &self.settings.schedule, now)
            .map_err(into_validation_error)?;
        let times = self.settings.schedule.compute(&record.event_local_timestamp)?;
        debug!(
            file_id = %file.id,
            invite_at = %times.invite_at,
            reminder_at = %times.reminder_at,
            close_at = %times.close_at,
            "computed schedule"
        );

        let survey_id = self.resolve_survey(&record).await?;
        let collector = self.resolve_collector(&survey_id, &record, &times).await?;
        let messages = self.resolve_messages(&collector.id, &record).await?;
        let target = target_recipients(&record, &self.settings.standing_recipients);
        let plan = self
            .sync_recipients(&collector.id, &messages.invite, &target)
            .await?;
        self.schedule_messages(&collector.id, &messages, &times).await?;

        self.roster_source.mark_processed(&file.id).await?;

        Ok(ReconciledRoster {
            survey_id,
            collector_id: collector.id,
            collector_url: collector.url,
            close_at: collector.close_at,
            invite_id: messages.invite,
            reminder_id: messages.reminder,
            recipients_added: plan.add,
            recipients_removed: plan.delete.into_iter().map(|r| r.email).collect(),
        })
    }

    /// Finds the per-event survey by name, cloning the template only when absent.
    async fn resolve_survey(&self, record: &RosterRecord) -> Result<SurveyId, BatonError> {
        let name = survey_name(record);
        if let Some(id) = self.platform.find_survey_by_name(&name).await? {
            debug!(survey_id = %id, name = %name, "reusing survey");
            return Ok(id);
        }

        let family = TemplateFamily::for_title(&record.event_title);
        let template_id = self.settings.templates.id_for(family);
        let id = self.platform.clone_survey(template_id, &name).await?;
        info!(survey_id = %id, template = %family, name = %name, "cloned survey from template");
        Ok(id)
    }

    /// Finds the collector by name, creating it when absent. An existing
    /// collector keeps the close time it was created with.
    async fn resolve_collector(
        &self,
        survey_id: &SurveyId,
        record: &RosterRecord,
        times: &ScheduleTimes,
    ) -> Result<Collector, BatonError> {
        let name = collector_name(record);
        if let Some(collector) = self.platform.find_collector_by_name(survey_id, &name).await? {
            debug!(
                collector_id = %collector.id,
                name = %name,
                close_at = ?collector.close_at,
                "reusing collector"
            );
            return Ok(collector);
        }

        let collector = self
            .platform
            .create_collector(survey_id, &name, times.close_at)
            .await?;
        info!(collector_id = %collector.id, close_at = %times.close_at, name = %name, "created collector");
        Ok(collector)
    }

    /// Ensures the collector holds exactly one invite and one reminder.
    async fn resolve_messages(
        &self,
        collector_id: &CollectorId,
        record: &RosterRecord,
    ) -> Result<CollectorMessages, BatonError> {
        let existing = self.platform.list_messages(collector_id).await?;
        let (invite, reminder) = classify_messages(collector_id, &existing)?;
        let wording = &self.settings.wording;

        let invite = match invite {
            Some(id) => id,
            None => {
                let id = self
                    .platform
                    .create_invite_message(
                        collector_id,
                        &render_wording(&wording.invite_subject, record),
                        &render_wording(&wording.invite_body, record),
                    )
                    .await?;
                info!(collector_id = %collector_id, message_id = %id, "created invite message");
                id
            }
        };

        let reminder = match reminder {
            Some(id) => id,
            None => {
                let id = self
                    .platform
                    .create_reminder_message(
                        collector_id,
                        &render_wording(&wording.reminder_subject, record),
                        &render_wording(&wording.reminder_body, record),
                    )
                    .await?;
                info!(collector_id = %collector_id, message_id = %id, "created reminder message");
                id
            }
        };

        Ok(CollectorMessages { invite, reminder })
    }

    /// Deletes recipients absent from `target` and adds the missing ones.
    async fn sync_recipients(
        &self,
        collector_id: &CollectorId,
        invite_id: &MessageId,
        target: &[String],
    ) -> Result<RecipientPlan, BatonError> {
        let current = self.platform.list_recipients(collector_id).await?;
        let plan = plan_recipient_sync(&current, target);

        for recipient in &plan.delete {
            self.platform
                .delete_recipient(collector_id, &recipient.id)
                .await?;
        }
        if !plan.add.is_empty() {
            self.platform
                .add_recipients(collector_id, invite_id, &plan.add)
                .await?;
        }

        debug!(
            collector_id = %collector_id,
            added = plan.add.len(),
            removed = plan.delete.len(),
            total = target.len(),
            "recipients synchronized"
        );
        Ok(plan)
    }

    /// Overwrites both messages' send times.
    async fn schedule_messages(
        &self,
        collector_id: &CollectorId,
        messages: &CollectorMessages,
        times: &ScheduleTimes,
    ) -> Result<(), BatonError> {
        self.platform
            .schedule_message(collector_id, &messages.invite, times.invite_at)
            .await?;
        self.platform
            .schedule_message(collector_id, &messages.reminder, times.reminder_at)
            .await?;
        Ok(())
    }
}

/// Splits fetched messages into at most one invite and one reminder.
///
/// More than two messages, a repeated kind, or a kind this system never
/// creates is an invalid state.
fn classify_messages(
    collector_id: &CollectorId,
    messages: &[MessageSummary],
) -> Result<(Option<MessageId>, Option<MessageId>), BatonError> {
    let invalid = |detail: String| BatonError::InvalidMessageState {
        collector_id: collector_id.to_string(),
        detail,
    };

    if messages.len() > 2 {
        return Err(invalid(format!(
            "expected at most 2 messages, found {}",
            messages.len()
        )));
    }

    let mut invite = None;
    let mut reminder = None;
    for message in messages {
        let slot = match message.kind {
            MessageKind::Invite => &mut invite,
            MessageKind::Reminder => &mut reminder,
            MessageKind::Other => {
                return Err(invalid(format!(
                    "message {} has an unsupported kind",
                    message.id
                )));
            }
        };
        if slot.replace(message.id.clone()).is_some() {
            return Err(invalid(format!("more than one {} message", message.kind)));
        }
    }

    Ok((invite, reminder))
}
