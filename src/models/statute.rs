//! Statute resolution result

use serde::Serialize;
use std::collections::BTreeMap;

/// One applicable statute and the flags that support it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatuteMatch {
    /// Statute id, e.g. "CCP § 473(b)"
    pub statute: String,
    pub description: String,
    /// Supporting flags, in rule-table order
    pub flags: Vec<String>,
}

/// Applicable statutes in rule-table order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub statutes: Vec<StatuteMatch>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.statutes.is_empty()
    }

    pub fn statute_ids(&self) -> Vec<&str> {
        self.statutes.iter().map(|m| m.statute.as_str()).collect()
    }

    /// Statute id → supporting flags
    pub fn justification(&self) -> BTreeMap<&str, &[String]> {
        self.statutes
            .iter()
            .map(|m| (m.statute.as_str(), m.flags.as_slice()))
            .collect()
    }

    pub fn contains(&self, statute: &str) -> bool {
        self.statutes.iter().any(|m| m.statute == statute)
    }

    pub fn get(&self, statute: &str) -> Option<&StatuteMatch> {
        self.statutes.iter().find(|m| m.statute == statute)
    }
}
