// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty folder ids, a known time zone, and positive durations.

use chrono_tz::Tz;

use crate::diagnostic::ConfigError;
use crate::model::BatonConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// One week.
pub const MAX_INVITE_DELAY_MINUTES: i64 = 7 * 24 * 60;
/// One year.
pub const MAX_CLOSE_AFTER_DAYS: i64 = 365;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BatonConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.run.log_level.as_str()) {
        fail(format!(
            "run.log_level `{}` is not one of {}",
            config.run.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let unprocessed = config.google.unprocessed_folder_id.trim();
    let processed = config.google.processed_folder_id.trim();
    if unprocessed.is_empty() {
        fail("google.unprocessed_folder_id must not be empty".to_string());
    }
    if processed.is_empty() {
        fail("google.processed_folder_id must not be empty".to_string());
    }
    if !unprocessed.is_empty() && unprocessed == processed {
        fail("google.unprocessed_folder_id and google.processed_folder_id must differ".to_string());
    }
    if config.google.worksheet.trim().is_empty() {
        fail("google.worksheet must not be empty".to_string());
    }
    // The event header occupies columns A..C.
    if config.google.email_column < 3 {
        fail(format!(
            "google.email_column must be at least 3 (column D), got {}",
            config.google.email_column
        ));
    }

    if config.templates.sso.trim().is_empty() {
        fail("templates.sso must not be empty".to_string());
    }
    if config.templates.seattle_opera.trim().is_empty() {
        fail("templates.seattle_opera must not be empty".to_string());
    }

    if config.schedule.time_zone.parse::<Tz>().is_err() {
        fail(format!(
            "schedule.time_zone `{}` is not a known IANA time zone",
            config.schedule.time_zone
        ));
    }
    if !(0..=MAX_INVITE_DELAY_MINUTES).contains(&config.schedule.invite_delay_minutes) {
        fail(format!(
            "schedule.invite_delay_minutes must be between 0 and {MAX_INVITE_DELAY_MINUTES}, got {}",
            config.schedule.invite_delay_minutes
        ));
    }
    if !(1..=MAX_CLOSE_AFTER_DAYS).contains(&config.schedule.close_after_days) {
        fail(format!(
            "schedule.close_after_days must be between 1 and {MAX_CLOSE_AFTER_DAYS}, got {}",
            config.schedule.close_after_days
        ));
    }
    if config.schedule.reminder_lead_days <= 0 {
        fail(format!(
            "schedule.reminder_lead_days must be positive, got {}",
            config.schedule.reminder_lead_days
        ));
    }
    if config.schedule.reminder_lead_days >= config.schedule.close_after_days {
        fail(format!(
            "schedule.reminder_lead_days ({}) must be less than schedule.close_after_days ({})",
            config.schedule.reminder_lead_days, config.schedule.close_after_days
        ));
    }

    for (i, email) in config.roster.standing_recipients.iter().enumerate() {
        if !looks_like_email(email) {
            fail(format!(
                "roster.standing_recipients[{i}] `{email}` is not an email address"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn looks_like_email(candidate: &str) -> bool {
    match candidate.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> BatonConfig {
        let mut config = BatonConfig::default();
        config.google.unprocessed_folder_id = "folder-unprocessed".into();
        config.google.processed_folder_id = "folder-processed".into();
        config.templates.sso = "tmpl-sso".into();
        config.templates.seattle_opera = "tmpl-opera".into();
        config
    }

    #[test]
    fn filled_in_defaults_validate() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn bare_defaults_report_every_missing_id() {
        let errors = validate_config(&BatonConfig::default()).unwrap_err();
        // Two folder ids and two template ids.
        assert_eq!(errors.len(), 4, "got: {errors:?}");
    }

    #[test]
    fn unknown_time_zone_is_rejected() {
        let mut config = valid_config();
        config.schedule.time_zone = "Pacific/Atlantis".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("Pacific/Atlantis"));
    }

    #[test]
    fn identical_folders_are_rejected() {
        let mut config = valid_config();
        config.google.processed_folder_id = "folder-unprocessed".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("must differ"));
    }

    #[test]
    fn malformed_standing_recipient_is_rejected() {
        let mut config = valid_config();
        config.roster.standing_recipients = vec!["librarian@example.org".into(), "nobody".into()];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("standing_recipients[1]"));
    }

    #[test]
    fn reminder_after_close_is_rejected() {
        let mut config = valid_config();
        config.schedule.reminder_lead_days = 9;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn oversized_durations_are_rejected() {
        let mut config = valid_config();
        config.schedule.close_after_days = 100_000_000;
        config.schedule.invite_delay_minutes = MAX_INVITE_DELAY_MINUTES + 1;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2, "got: {errors:?}");
        assert!(errors[0].to_string().contains("invite_delay_minutes"));
        assert!(errors[1].to_string().contains("close_after_days"));
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        let mut config = valid_config();
        config.schedule.close_after_days = MAX_CLOSE_AFTER_DAYS;
        config.schedule.invite_delay_minutes = MAX_INVITE_DELAY_MINUTES;
        assert!(validate_config(&config).is_ok());
    }
}
