//! Flag evaluators
//!
//! Pure functions that turn a single answer into flag labels. The engine
//! combines them with each question's static flags and follow-up flags.

pub mod date;
pub mod text;

pub use date::{evaluate_date_flags, parse_date, DateThresholds, DATE_FORMAT};
pub use text::{evaluate_text_flags, TextPatterns};
