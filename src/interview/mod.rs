//! Interview flow
//!
//! - `engine`: the state machine; validates, stores, raises flags, branches
//! - `prompt`: reads one typed answer through an `InterviewIo`
//! - `runner`: loops the two together and prints the summary

pub mod engine;
pub mod prompt;
pub mod runner;

pub use engine::{InterviewEngine, Transition};
pub use prompt::ask;
pub use runner::{summary_lines, InterviewOutcome, InterviewRunner};
