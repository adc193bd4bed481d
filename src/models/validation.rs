//! Error taxonomy for question graphs and submitted answers
//!
//! - `StructureError`: the question graph itself is broken. Fatal at load or
//!   construction time.
//! - `ValidationError`: a submitted answer violates its question's
//!   constraints. Recoverable, the caller re-prompts.
//! - `AnswerError`: everything `InterviewEngine::process_answer` can reject.
//!
//! A required question left blank is not an error at all; the engine answers
//! it with `Transition::Retry`.

use thiserror::Error;

/// Problems with the shape of a question graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("Failed to parse question graph: {0}")]
    Yaml(String),

    #[error("Invalid question graph: {0}")]
    InvalidDocument(String),

    #[error("Question graph contains no questions")]
    NoQuestions,

    #[error("Question #{index} is not a mapping")]
    NotAMapping { index: usize },

    #[error("Question {question}: missing required field '{field}'")]
    MissingField {
        question: String,
        field: &'static str,
    },

    #[error("Question {question}: invalid field '{field}': {reason}")]
    InvalidField {
        question: String,
        field: String,
        reason: String,
    },

    #[error("Duplicate question id: {0}")]
    DuplicateId(String),

    #[error("Start question {0} does not exist")]
    UnknownStart(String),

    #[error("Question {question} references non-existent question {target}")]
    UnknownReference { question: String, target: String },

    #[error("Circular reference detected in question flow: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    #[error("Summary question {question} cannot declare '{field}'")]
    SummaryTransition {
        question: String,
        field: &'static str,
    },
}

impl StructureError {
    pub(crate) fn invalid(
        question: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        StructureError::InvalidField {
            question: question.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// A submitted answer that does not satisfy its question
///
/// Display strings are shown verbatim to the person being interviewed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Expected {expected}, got {found}")]
    TypeMismatch {
        question: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Value must be at least {min}")]
    BelowMinimum { question: String, min: f64 },

    #[error("Value must be at most {max}")]
    AboveMaximum { question: String, max: f64 },

    #[error("Text must be at least {min} characters")]
    TooShort { question: String, min: usize },

    #[error("Text must be at most {max} characters")]
    TooLong { question: String, max: usize },

    #[error("Invalid choice. Options are: {}", .options.join(", "))]
    NotAnOption {
        question: String,
        options: Vec<String>,
    },

    #[error("Invalid choices: {}", .invalid.join(", "))]
    InvalidChoices {
        question: String,
        invalid: Vec<String>,
    },

    #[error("At least {min} choices required")]
    TooFewChoices { question: String, min: usize },

    #[error("At most {max} choices allowed")]
    TooManyChoices { question: String, max: usize },

    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate { question: String, value: String },
}

impl ValidationError {
    /// Id of the question the answer was submitted for
    pub fn question_id(&self) -> &str {
        match self {
            ValidationError::TypeMismatch { question, .. }
            | ValidationError::BelowMinimum { question, .. }
            | ValidationError::AboveMaximum { question, .. }
            | ValidationError::TooShort { question, .. }
            | ValidationError::TooLong { question, .. }
            | ValidationError::NotAnOption { question, .. }
            | ValidationError::InvalidChoices { question, .. }
            | ValidationError::TooFewChoices { question, .. }
            | ValidationError::TooManyChoices { question, .. }
            | ValidationError::InvalidDate { question, .. } => question,
        }
    }

    /// Name of the violated constraint, matching the question field that
    /// declares it
    pub fn constraint(&self) -> &'static str {
        match self {
            ValidationError::TypeMismatch { .. } => "type",
            ValidationError::BelowMinimum { .. } => "min",
            ValidationError::AboveMaximum { .. } => "max",
            ValidationError::TooShort { .. } => "min_length",
            ValidationError::TooLong { .. } => "max_length",
            ValidationError::NotAnOption { .. } | ValidationError::InvalidChoices { .. } => {
                "options"
            }
            ValidationError::TooFewChoices { .. } => "min_choices",
            ValidationError::TooManyChoices { .. } => "max_choices",
            ValidationError::InvalidDate { .. } => "date",
        }
    }
}

/// Everything `process_answer` can reject
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnswerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Interview is already complete")]
    InterviewComplete,
}
