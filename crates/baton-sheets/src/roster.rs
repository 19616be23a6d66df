// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Roster sheet layout.
//!
//! Row 1 holds the event: title in column A, conductor in B, and the local
//! start `YYYY-MM-DD HH:MM` in C. Every later row is one musician, with the
//! email address in a fixed column.

use std::collections::HashSet;

use baton_core::RosterDraft;

const TITLE_COLUMN: usize = 0;
const CONDUCTOR_COLUMN: usize = 1;
const TIMESTAMP_COLUMN: usize = 2;

/// Turns raw sheet rows into a [`RosterDraft`].
///
/// Blank header cells become `None` so validation can name them. Email cells
/// are trimmed and kept only when they look like an address; the standing
/// recipients are appended and the list is deduplicated case-insensitively,
/// keeping the first spelling seen.
pub fn parse_roster_rows(
    rows: &[Vec<String>],
    email_column: usize,
    standing_recipients: &[String],
) -> RosterDraft {
    let header = rows.first();
    let header_cell = |column: usize| {
        header
            .and_then(|row| row.get(column))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
    };

    let sheet_emails = rows
        .iter()
        .skip(1)
        .filter_map(|row| row.get(email_column))
        .map(|cell| cell.trim())
        .filter(|cell| looks_like_email(cell));

    let mut seen = HashSet::new();
    let recipient_emails = sheet_emails
        .chain(standing_recipients.iter().map(|e| e.trim()))
        .filter(|email| seen.insert(email.to_lowercase()))
        .map(str::to_string)
        .collect();

    RosterDraft {
        event_title: header_cell(TITLE_COLUMN),
        conductor_name: header_cell(CONDUCTOR_COLUMN),
        event_local_timestamp: header_cell(TIMESTAMP_COLUMN),
        recipient_emails,
    }
}

/// `local@domain` with no whitespace.
fn looks_like_email(candidate: &str) -> bool {
    match candidate.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !candidate.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sample() -> Vec<Vec<String>> {
        vec![
            row(&["SUB 9", "Jane Doe", "2025-09-16 20:00"]),
            row(&["", "", "", "Jacqueline", "Audas", " jaudas@icloud.com ", "Violin 1"]),
            row(&["", "", "", "Jennifer", "Bai", "yubaiviolin@yahoo.com", "Violin 1"]),
            row(&["", "", "", "Timothy", "Garland"]),
            row(&["", "", "", "Sub", "Tbd", "TBD", "Viola"]),
        ]
    }

    #[test]
    fn reads_header_and_email_column() {
        let draft = parse_roster_rows(&sample(), 5, &[]);
        assert_eq!(draft.event_title.as_deref(), Some("SUB 9"));
        assert_eq!(draft.conductor_name.as_deref(), Some("Jane Doe"));
        assert_eq!(draft.event_local_timestamp.as_deref(), Some("2025-09-16 20:00"));
        assert_eq!(
            draft.recipient_emails,
            vec!["jaudas@icloud.com", "yubaiviolin@yahoo.com"]
        );
    }

    #[test]
    fn standing_recipients_are_appended_once() {
        let standing = vec!["lib@orchestra.test".to_string(), "JAUDAS@icloud.com".into()];
        let draft = parse_roster_rows(&sample(), 5, &standing);
        assert_eq!(
            draft.recipient_emails,
            vec!["jaudas@icloud.com", "yubaiviolin@yahoo.com", "lib@orchestra.test"]
        );
    }

    #[test]
    fn blank_header_cells_are_absent() {
        let rows = vec![row(&["  ", "Jane Doe"]), row(&["", "", "", "", "", "a@x.com"])];
        let draft = parse_roster_rows(&rows, 5, &[]);
        assert!(draft.event_title.is_none());
        assert_eq!(draft.conductor_name.as_deref(), Some("Jane Doe"));
        assert!(draft.event_local_timestamp.is_none());
    }

    #[test]
    fn empty_sheet_yields_only_standing() {
        let draft = parse_roster_rows(&[], 5, &["lib@orchestra.test".to_string()]);
        assert_eq!(draft, RosterDraft {
            recipient_emails: vec!["lib@orchestra.test".into()],
            ..RosterDraft::default()
        });
    }

    #[test]
    fn header_row_email_cell_is_ignored() {
        let rows = vec![row(&["T", "C", "2025-09-16 20:00", "", "", "header@x.com"])];
        assert!(parse_roster_rows(&rows, 5, &[]).recipient_emails.is_empty());
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@x.com"));
        assert!(!looks_like_email("a@"));
        assert!(!looks_like_email("@x.com"));
        assert!(!looks_like_email("a b@x.com"));
        assert!(!looks_like_email("a@b@c"));
        assert!(!looks_like_email("n/a"));
    }

    proptest! {
        #[test]
        fn recipients_never_repeat(emails in prop::collection::vec("[a-cA-C]{1,2}@x\\.com", 0..12)) {
            let mut rows = vec![row(&["T", "C", "2025-09-16 20:00"])];
            rows.extend(emails.iter().map(|e| row(&["", "", "", "", "", e])));
            let draft = parse_roster_rows(&rows, 5, &[]);
            let mut keys: Vec<String> = draft.recipient_emails.iter().map(|e| e.to_lowercase()).collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), total);
        }
    }
}
