//! Advisory notes printed after an interview
//!
//! These read flags directly and are independent of the statute table.

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLevel {
    Ground,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentNote {
    pub level: NoteLevel,
    pub message: &'static str,
}

impl fmt::Display for AssessmentNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            NoteLevel::Ground => "✅",
            NoteLevel::Warning => "⚠️",
        };
        write!(f, "{} {}", marker, self.message)
    }
}

const GROUNDS: &[(&str, &str)] = &[
    (
        "improper_service",
        "Potential grounds for motion based on improper service (CCP § 473.5)",
    ),
    (
        "mistake_neglect",
        "Potential grounds based on mistake/excusable neglect (CCP § 473(b))",
    ),
    (
        "fraud_misconduct",
        "Potential grounds based on fraud/misconduct (CCP § 473(d))",
    ),
    ("void_judgment", "Potential void judgment argument available"),
];

const WARNINGS: &[(&str, &str)] = &[
    (
        "time_barred",
        "Motion may be time-barred - careful review needed",
    ),
    (
        "urgent_lockout",
        "URGENT: Lockout imminent - consider ex parte application",
    ),
];

const NO_GROUNDS: &str = "No clear grounds for relief identified - further review needed";

fn matching(
    table: &'static [(&'static str, &'static str)],
    flags: &BTreeSet<String>,
    level: NoteLevel,
) -> Vec<AssessmentNote> {
    table
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|&(_, message)| AssessmentNote { level, message })
        .collect()
}

/// Notes in display order: grounds, then warnings
pub fn assess(flags: &BTreeSet<String>) -> Vec<AssessmentNote> {
    let mut notes = matching(GROUNDS, flags, NoteLevel::Ground);
    let has_grounds = !notes.is_empty();
    notes.extend(matching(WARNINGS, flags, NoteLevel::Warning));

    if !has_grounds {
        notes.push(AssessmentNote {
            level: NoteLevel::Warning,
            message: NO_GROUNDS,
        });
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_grounds_and_warnings() {
        let notes = assess(&flags(&["urgent_lockout", "improper_service", "void_judgment"]));
        let messages: Vec<String> = notes.iter().map(ToString::to_string).collect();

        assert_eq!(
            messages,
            vec![
                "✅ Potential grounds for motion based on improper service (CCP § 473.5)",
                "✅ Potential void judgment argument available",
                "⚠️ URGENT: Lockout imminent - consider ex parte application",
            ]
        );
    }

    #[test]
    fn test_no_grounds() {
        let notes = assess(&flags(&["time_barred"]));
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].message, "Motion may be time-barred - careful review needed");
        assert_eq!(notes[1].message, NO_GROUNDS);
        assert_eq!(notes[1].level, NoteLevel::Warning);

        assert_eq!(assess(&BTreeSet::new())[0].message, NO_GROUNDS);
    }
}
