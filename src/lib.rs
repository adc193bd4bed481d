// Vacatur - default judgment intake interview
// Walks a question graph, derives flags from the answers and maps them to statutes

pub mod cli;
pub mod config;
pub mod flags;
pub mod interview;
pub mod io;
pub mod models;
pub mod parser;
pub mod rules;
pub mod services;
pub mod state;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::AppConfig;
pub use interview::{InterviewEngine, InterviewOutcome, InterviewRunner, Transition};
pub use io::{ConsoleIo, InterviewIo, ScriptedIo};
pub use models::{Answer, Answers, InterviewDefinition, Question, QuestionKind, Resolution};
pub use state::{FlagEvent, FlagSource, Session};
