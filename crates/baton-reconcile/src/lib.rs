// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Roster validation, send-time calculation, and survey reconciliation.
//!
//! [`Reconciler`] drives one pass over the pending rosters of a
//! [`RosterSource`](baton_core::RosterSource) against a
//! [`SurveyPlatform`](baton_core::SurveyPlatform). The pure helpers it uses
//! ([`ScheduleRules`], [`validate_roster`], [`TemplateFamily`]) are exported
//! for direct use.

pub mod engine;
pub mod settings;
pub mod summary;
pub mod template;
pub mod time;
pub mod validator;

pub use engine::{Reconciler, plan_recipient_sync, target_recipients};
pub use settings::{MessageWording, ReconcileSettings};
pub use summary::{ReconciledRoster, RosterOutcome, RunSummary};
pub use template::{SurveyTemplates, TemplateFamily};
pub use time::{ScheduleRules, ScheduleTimes};
pub use validator::{RosterProblem, validate_roster};
