//! Per-type answer validation

use crate::flags::parse_date;
use crate::models::{Answer, Question, QuestionKind, ValidationError};

/// Check an answer against its question's type and constraints
///
/// A blank answer to a required question is the engine's business. A blank
/// answer to an optional question is still held to the declared bounds:
/// `""` against `min_length`, an empty list against `min_choices`, and a
/// choice must always be one of the options. Only a blank date is let
/// through without parsing.
pub fn validate_answer(question: &Question, answer: &Answer) -> Result<(), ValidationError> {
    let mismatch = |expected: &'static str| ValidationError::TypeMismatch {
        question: question.id.clone(),
        expected,
        found: answer.kind_name(),
    };

    match question.kind {
        QuestionKind::Summary => Ok(()),

        QuestionKind::Boolean => match answer {
            Answer::Bool(_) => Ok(()),
            _ => Err(mismatch("boolean")),
        },

        QuestionKind::Number => {
            let value = answer.as_number().ok_or_else(|| mismatch("number"))?;
            if !value.is_finite() {
                return Err(mismatch("number"));
            }
            check_range(question, value)
        }

        QuestionKind::Text => {
            let text = answer.as_text().ok_or_else(|| mismatch("string"))?;
            check_length(question, if answer.is_empty() { "" } else { text })
        }

        QuestionKind::Date => {
            let text = answer.as_text().ok_or_else(|| mismatch("string"))?;
            if answer.is_empty() || parse_date(text).is_some() {
                Ok(())
            } else {
                Err(ValidationError::InvalidDate {
                    question: question.id.clone(),
                    value: text.to_string(),
                })
            }
        }

        QuestionKind::Choice => {
            let text = answer.as_text().ok_or_else(|| mismatch("string"))?;
            if question.options.iter().any(|o| o == text) {
                Ok(())
            } else {
                Err(ValidationError::NotAnOption {
                    question: question.id.clone(),
                    options: question.options.clone(),
                })
            }
        }

        QuestionKind::MultipleChoice => {
            let choices: &[String] = match answer {
                Answer::List(items) => items.as_slice(),
                Answer::Text(_) if answer.is_empty() => &[],
                _ => return Err(mismatch("list")),
            };
            check_choices(question, choices)
        }
    }
}

fn check_range(question: &Question, value: f64) -> Result<(), ValidationError> {
    if let Some(min) = question.min {
        if value < min {
            return Err(ValidationError::BelowMinimum {
                question: question.id.clone(),
                min,
            });
        }
    }
    if let Some(max) = question.max {
        if value > max {
            return Err(ValidationError::AboveMaximum {
                question: question.id.clone(),
                max,
            });
        }
    }
    Ok(())
}

fn check_length(question: &Question, text: &str) -> Result<(), ValidationError> {
    let length = text.chars().count();
    if let Some(min) = question.min_length {
        if length < min {
            return Err(ValidationError::TooShort {
                question: question.id.clone(),
                min,
            });
        }
    }
    if let Some(max) = question.max_length {
        if length > max {
            return Err(ValidationError::TooLong {
                question: question.id.clone(),
                max,
            });
        }
    }
    Ok(())
}

fn check_choices(question: &Question, choices: &[String]) -> Result<(), ValidationError> {
    let invalid: Vec<String> = choices
        .iter()
        .filter(|c| !question.options.contains(c))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(ValidationError::InvalidChoices {
            question: question.id.clone(),
            invalid,
        });
    }

    if let Some(min) = question.min_choices {
        if choices.len() < min {
            return Err(ValidationError::TooFewChoices {
                question: question.id.clone(),
                min,
            });
        }
    }
    if let Some(max) = question.max_choices {
        if choices.len() > max {
            return Err(ValidationError::TooManyChoices {
                question: question.id.clone(),
                max,
            });
        }
    }
    Ok(())
}
