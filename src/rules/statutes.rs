//! Flag → statute mapping

use crate::models::{Resolution, StatuteMatch};
use std::collections::BTreeSet;

/// One statute and the flags that support it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatuteRule {
    pub statute: &'static str,
    pub description: &'static str,
    pub flags: &'static [&'static str],
}

/// Rule table, in the order statutes are reported
pub const STATUTE_RULES: &[StatuteRule] = &[
    StatuteRule {
        statute: "CCP § 473(b)",
        description: "Excusable neglect, mistake, surprise, or inadvertence",
        flags: &[
            "tenant_unaware_of_hearing",
            "mailing_not_done",
            "service_defective",
            "tenant_mistake_or_confusion",
            "unable_to_appear_due_to_emergency",
        ],
    },
    StatuteRule {
        statute: "CCP § 473(d)",
        description: "Void judgments due to lack of jurisdiction or facial defects",
        flags: &[
            "judgment_void_on_face",
            "no_subject_matter_jurisdiction",
            "wrong_party_named",
        ],
    },
    StatuteRule {
        statute: "CCP § 473.5",
        description: "Lack of actual notice of the lawsuit",
        flags: &[
            "no_actual_notice",
            "served_at_wrong_address",
            "mailing_failed",
            "did_not_receive_summons",
        ],
    },
];

/// Look up a rule by statute id
pub fn rule_for(statute: &str) -> Option<&'static StatuteRule> {
    STATUTE_RULES.iter().find(|rule| rule.statute == statute)
}

/// Every statute supported by at least one flag, in table order
///
/// Flags the table does not mention are ignored.
pub fn resolve(flags: &BTreeSet<String>) -> Resolution {
    let statutes: Vec<StatuteMatch> = STATUTE_RULES
        .iter()
        .filter_map(|rule| {
            let matched: Vec<String> = rule
                .flags
                .iter()
                .filter(|flag| flags.contains(**flag))
                .map(|flag| flag.to_string())
                .collect();
            (!matched.is_empty()).then(|| StatuteMatch {
                statute: rule.statute.to_string(),
                description: rule.description.to_string(),
                flags: matched,
            })
        })
        .collect();

    tracing::info!(
        statutes = ?statutes.iter().map(|m| m.statute.as_str()).collect::<Vec<_>>(),
        "statutes resolved"
    );
    Resolution { statutes }
}
