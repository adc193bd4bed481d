pub mod assessment;
pub mod statutes;

pub use assessment::{assess, AssessmentNote, NoteLevel};
pub use statutes::{resolve, rule_for, StatuteRule, STATUTE_RULES};
