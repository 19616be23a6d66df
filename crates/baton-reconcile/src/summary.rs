// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-pass bookkeeping.

use std::fmt;

use baton_core::{CollectorId, MessageId, RosterFile, SurveyId};
use chrono::{DateTime, Utc};

/// Remote objects a successfully reconciled roster resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledRoster {
    pub survey_id: SurveyId,
    pub collector_id: CollectorId,
    pub collector_url: Option<String>,
    /// Close time the collector carries, which may predate this pass.
    pub close_at: Option<DateTime<Utc>>,
    pub invite_id: MessageId,
    pub reminder_id: MessageId,
    pub recipients_added: Vec<String>,
    pub recipients_removed: Vec<String>,
}

/// What happened to one roster during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterOutcome {
    /// Fully reconciled and moved to the processed location.
    Processed(ReconciledRoster),
    /// Failed validation; left pending.
    Skipped { problems: Vec<String> },
    /// A remote call or the message invariant failed; left pending.
    Failed { error: String },
}

/// Outcomes of one pass, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<(RosterFile, RosterOutcome)>,
}

impl RunSummary {
    pub fn record(&mut self, file: RosterFile, outcome: RosterOutcome) {
        self.outcomes.push((file, outcome));
    }

    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, RosterOutcome::Processed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RosterOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RosterOutcome::Failed { .. }))
    }

    /// Looks up the outcome for a roster by file name.
    pub fn outcome_for(&self, file_name: &str) -> Option<&RosterOutcome> {
        self.outcomes
            .iter()
            .find(|(file, _)| file.name == file_name)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, pred: impl Fn(&RosterOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} roster(s): {} processed, {} skipped, {} failed",
            self.outcomes.len(),
            self.processed(),
            self.skipped(),
            self.failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baton_core::FileId;

    fn file(name: &str) -> RosterFile {
        RosterFile {
            id: FileId::from(name),
            name: name.to_string(),
        }
    }

    #[test]
    fn counts_each_outcome_kind() {
        let mut summary = RunSummary::default();
        summary.record(
            file("a"),
            RosterOutcome::Skipped {
                problems: vec!["event title is missing".into()],
            },
        );
        summary.record(
            file("b"),
            RosterOutcome::Failed {
                error: "boom".into(),
            },
        );
        summary.record(
            file("c"),
            RosterOutcome::Failed {
                error: "boom".into(),
            },
        );

        assert_eq!(summary.processed(), 0);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.failed(), 2);
        assert_eq!(
            summary.to_string(),
            "3 roster(s): 0 processed, 1 skipped, 2 failed"
        );
        assert!(matches!(
            summary.outcome_for("a"),
            Some(RosterOutcome::Skipped { .. })
        ));
        assert!(summary.outcome_for("zzz").is_none());
    }
}
