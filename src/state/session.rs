//! Session - answers and flags accumulated by one interview

use crate::models::{Answer, Answers};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Which trigger raised a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSource {
    /// The question's own `flags`
    Static,
    /// A `flags_from_text` pattern matched
    Text,
    /// A `date_flags` threshold was reached
    Date,
    /// A follow-up branch's `flags`
    Branch,
}

impl fmt::Display for FlagSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlagSource::Static => "static",
            FlagSource::Text => "text",
            FlagSource::Date => "date",
            FlagSource::Branch => "branch",
        };
        f.write_str(name)
    }
}

/// One raised flag, in the order it was raised
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagEvent {
    pub question_id: String,
    pub flag: String,
    pub source: FlagSource,
}

/// Answers plus raised flags
#[derive(Debug, Clone, Default)]
pub struct Session {
    answers: Answers,
    flags: BTreeSet<String>,
    trail: Vec<FlagEvent>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_answer(&mut self, question_id: &str, answer: Answer) {
        if self.answers.insert(question_id, answer).is_some() {
            tracing::debug!(question_id, "answer overwritten");
        }
    }

    /// Raise a flag. The flag set ignores repeats; the trail keeps them.
    pub fn raise(&mut self, question_id: &str, flag: &str, source: FlagSource) {
        tracing::debug!(question_id, flag, %source, "flag raised");
        self.flags.insert(flag.to_string());
        self.trail.push(FlagEvent {
            question_id: question_id.to_string(),
            flag: flag.to_string(),
            source,
        });
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Deduplicated flags, alphabetical
    pub fn flags(&self) -> &BTreeSet<String> {
        &self.flags
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn trail(&self) -> &[FlagEvent] {
        &self.trail
    }

    pub fn into_parts(self) -> (Answers, BTreeSet<String>, Vec<FlagEvent>) {
        (self.answers, self.flags, self.trail)
    }
}
