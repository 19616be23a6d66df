// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine settings derived from configuration.

use baton_config::BatonConfig;
use baton_core::BatonError;
use chrono::TimeDelta;
use chrono_tz::Tz;

use crate::template::SurveyTemplates;
use crate::time::ScheduleRules;

/// Subject and body wording for the two message kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWording {
    pub invite_subject: String,
    pub invite_body: String,
    pub reminder_subject: String,
    pub reminder_body: String,
}

/// Everything the reconciler needs besides its two remote handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileSettings {
    pub templates: SurveyTemplates,
    pub schedule: ScheduleRules,
    pub wording: MessageWording,
    pub standing_recipients: Vec<String>,
}

impl ReconcileSettings {
    /// Builds settings from a validated configuration.
    pub fn from_config(config: &BatonConfig) -> Result<Self, BatonError> {
        let time_zone: Tz = config.schedule.time_zone.parse().map_err(|_| {
            BatonError::Config(format!(
                "unknown time zone `{}`",
                config.schedule.time_zone
            ))
        })?;

        Ok(Self {
            templates: SurveyTemplates {
                sso: config.templates.sso.clone(),
                seattle_opera: config.templates.seattle_opera.clone(),
            },
            schedule: ScheduleRules {
                time_zone,
                invite_delay: duration(
                    "schedule.invite_delay_minutes",
                    config.schedule.invite_delay_minutes,
                    TimeDelta::try_minutes,
                )?,
                close_after: duration(
                    "schedule.close_after_days",
                    config.schedule.close_after_days,
                    TimeDelta::try_days,
                )?,
                reminder_lead: duration(
                    "schedule.reminder_lead_days",
                    config.schedule.reminder_lead_days,
                    TimeDelta::try_days,
                )?,
            },
            wording: MessageWording {
                invite_subject: config.messages.invite_subject.clone(),
                invite_body: config.messages.invite_body.clone(),
                reminder_subject: config.messages.reminder_subject.clone(),
                reminder_body: config.messages.reminder_body.clone(),
            },
            standing_recipients: config.roster.standing_recipients.clone(),
        })
    }
}

fn duration(
    key: &str,
    value: i64,
    make: fn(i64) -> Option<TimeDelta>,
) -> Result<TimeDelta, BatonError> {
    make(value).ok_or_else(|| BatonError::Config(format!("{key} `{value}` is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_translate_to_default_rules() {
        let settings = ReconcileSettings::from_config(&BatonConfig::default()).unwrap();
        assert_eq!(settings.schedule, ScheduleRules::default());
        assert_eq!(
            settings.wording.invite_subject,
            "Conductor Evaluation for {title}"
        );
    }

    #[test]
    fn unknown_zone_is_a_config_error() {
        let mut config = BatonConfig::default();
        config.schedule.time_zone = "Mars/Olympus_Mons".into();
        let err = ReconcileSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, BatonError::Config(_)));
    }

    #[test]
    fn out_of_range_duration_is_a_config_error() {
        let mut config = BatonConfig::default();
        config.schedule.close_after_days = 1_000_000_000_000;
        let err = ReconcileSettings::from_config(&config).unwrap_err();
        assert!(
            err.to_string().contains("schedule.close_after_days"),
            "got: {err}"
        );
    }
}
