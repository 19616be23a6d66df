// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Baton survey scheduler.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Baton configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values, except the
/// folder and template identifiers, which validation insists on.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BatonConfig {
    /// Process-level settings.
    #[serde(default)]
    pub run: RunConfig,

    /// SurveyMonkey API settings.
    #[serde(default)]
    pub surveymonkey: SurveyMonkeyConfig,

    /// Google Drive / Sheets settings.
    #[serde(default)]
    pub google: GoogleConfig,

    /// Template survey identifiers.
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Invite and reminder message wording.
    #[serde(default)]
    pub messages: MessagesConfig,

    /// Send-time and close-time rules.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Roster parsing settings.
    #[serde(default)]
    pub roster: RosterConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// SurveyMonkey API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SurveyMonkeyConfig {
    /// Bearer access token. `None` requires the `SURVEYMONKEY_ACCESS_TOKEN` environment variable.
    #[serde(default)]
    pub access_token: Option<String>,

    /// API base URL.
    #[serde(default = "default_surveymonkey_base_url")]
    pub base_url: String,

    /// Retries after a transient (429/5xx) response.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SurveyMonkeyConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: default_surveymonkey_base_url(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_surveymonkey_base_url() -> String {
    "https://api.surveymonkey.com/v3".to_string()
}

fn default_max_retries() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    60
}

/// Google Drive and Sheets configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleConfig {
    /// OAuth access token. `None` requires the `GOOGLE_ACCESS_TOKEN` environment variable.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Drive v3 API base URL.
    #[serde(default = "default_drive_base_url")]
    pub drive_base_url: String,

    /// Sheets v4 API base URL.
    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,

    /// Drive folder holding rosters that still need processing.
    #[serde(default)]
    pub unprocessed_folder_id: String,

    /// Drive folder rosters are moved to once processed.
    #[serde(default)]
    pub processed_folder_id: String,

    /// Worksheet (tab) name holding the roster.
    #[serde(default = "default_worksheet")]
    pub worksheet: String,

    /// Zero-based column index of the recipient email (5 = column F).
    #[serde(default = "default_email_column")]
    pub email_column: usize,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            drive_base_url: default_drive_base_url(),
            sheets_base_url: default_sheets_base_url(),
            unprocessed_folder_id: String::new(),
            processed_folder_id: String::new(),
            worksheet: default_worksheet(),
            email_column: default_email_column(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_drive_base_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_worksheet() -> String {
    "Sheet1".to_string()
}

fn default_email_column() -> usize {
    5
}

/// Template survey identifiers, one per template family.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Default ("SSO") template survey id.
    #[serde(default)]
    pub sso: String,

    /// "Seattle Opera" template survey id, used for titles containing "opera".
    #[serde(default)]
    pub seattle_opera: String,
}

/// Invite and reminder wording. `{title}` and `{conductor}` are substituted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MessagesConfig {
    #[serde(default = "default_invite_subject")]
    pub invite_subject: String,

    #[serde(default = "default_invite_body")]
    pub invite_body: String,

    #[serde(default = "default_reminder_subject")]
    pub reminder_subject: String,

    #[serde(default = "default_reminder_body")]
    pub reminder_body: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            invite_subject: default_invite_subject(),
            invite_body: default_invite_body(),
            reminder_subject: default_reminder_subject(),
            reminder_body: default_reminder_body(),
        }
    }
}

fn default_invite_subject() -> String {
    "Conductor Evaluation for {title}".to_string()
}

fn default_invite_body() -> String {
    "Hello! Please complete the evaluation of {conductor} for {title}.".to_string()
}

fn default_reminder_subject() -> String {
    "Reminder: Conductor Evaluation for {title}".to_string()
}

fn default_reminder_body() -> String {
    "Hello! We have not yet received your evaluation of {conductor} for {title}.".to_string()
}

/// Send-time and close-time rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// IANA time zone the roster's event timestamps are written in.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Minutes after the event start at which the invite goes out.
    #[serde(default = "default_invite_delay_minutes")]
    pub invite_delay_minutes: i64,

    /// Days after the invite at which the collector closes.
    #[serde(default = "default_close_after_days")]
    pub close_after_days: i64,

    /// Days after the invite at which the reminder goes out.
    #[serde(default = "default_reminder_lead_days")]
    pub reminder_lead_days: i64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            invite_delay_minutes: default_invite_delay_minutes(),
            close_after_days: default_close_after_days(),
            reminder_lead_days: default_reminder_lead_days(),
        }
    }
}

fn default_time_zone() -> String {
    "America/Los_Angeles".to_string()
}

fn default_invite_delay_minutes() -> i64 {
    100
}

fn default_close_after_days() -> i64 {
    8
}

fn default_reminder_lead_days() -> i64 {
    3
}

/// Roster parsing configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RosterConfig {
    /// Addresses appended to every roster (the librarians).
    #[serde(default)]
    pub standing_recipients: Vec<String>,
}
