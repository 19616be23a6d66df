// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template survey selection and the canonical remote object names.

use baton_core::RosterRecord;
use strum::Display;

/// The template survey family a roster is evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TemplateFamily {
    #[strum(serialize = "SSO")]
    Sso,
    #[strum(serialize = "Seattle Opera")]
    SeattleOpera,
}

impl TemplateFamily {
    /// Titles containing "opera" (any case) use the Seattle Opera template.
    pub fn for_title(event_title: &str) -> Self {
        if event_title.to_lowercase().contains("opera") {
            Self::SeattleOpera
        } else {
            Self::Sso
        }
    }
}

/// Template survey ids per family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyTemplates {
    pub sso: String,
    pub seattle_opera: String,
}

impl SurveyTemplates {
    pub fn id_for(&self, family: TemplateFamily) -> &str {
        match family {
            TemplateFamily::Sso => &self.sso,
            TemplateFamily::SeattleOpera => &self.seattle_opera,
        }
    }
}

/// Title of the per-event survey cloned from the template.
pub fn survey_name(record: &RosterRecord) -> String {
    format!(
        "Conductor Evaluation for {} ({})",
        record.conductor_name, record.event_title
    )
}

/// Name of the email collector on that survey.
pub fn collector_name(record: &RosterRecord) -> String {
    format!(
        "Email Invitation for {} ({})",
        record.conductor_name, record.event_title
    )
}

/// Substitutes `{title}` and `{conductor}` in message wording.
pub fn render_wording(template: &str, record: &RosterRecord) -> String {
    template
        .replace("{title}", &record.event_title)
        .replace("{conductor}", &record.conductor_name)
}
