//! Question graph loader
//!
//! ```yaml
//! title: Motion to Vacate Default Judgment   # optional
//! start_id: case_number                      # optional, defaults to the first question
//! questions:
//!   - id: case_number
//!     type: text
//!     prompt: What is the case number?
//! ```

use crate::io::InterviewIo;
use crate::models::{InterviewDefinition, Question, StructureError};
use crate::Result;
use anyhow::Context;
use serde_yaml::Value;
use std::path::Path;

/// Built-in default-judgment interview
pub const DEFAULT_QUESTIONS: &str = include_str!("../../prompts/vacate_default.yaml");

/// Parse a question graph document
///
/// Only the document shape and each question's fields are checked here;
/// references and cycles are checked when an engine is built.
pub fn parse_definition(source: &str) -> std::result::Result<InterviewDefinition, StructureError> {
    let document: Value =
        serde_yaml::from_str(source).map_err(|e| StructureError::Yaml(e.to_string()))?;
    let map = document
        .as_mapping()
        .ok_or_else(|| StructureError::InvalidDocument("top level must be a mapping".into()))?;

    let items = match map.get("questions") {
        None | Some(Value::Null) => return Err(StructureError::NoQuestions),
        Some(Value::Sequence(items)) => items,
        Some(_) => {
            return Err(StructureError::InvalidDocument(
                "'questions' must be a list".into(),
            ))
        }
    };
    if items.is_empty() {
        return Err(StructureError::NoQuestions);
    }

    let questions = items
        .iter()
        .enumerate()
        .map(|(index, item)| Question::from_value(index, item))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut definition = InterviewDefinition::new(questions);
    match map.get("start_id") {
        None | Some(Value::Null) => {}
        Some(Value::String(start)) => definition.start_id = start.clone(),
        Some(_) => {
            return Err(StructureError::InvalidDocument(
                "'start_id' must be a string".into(),
            ))
        }
    }
    match map.get("title") {
        None | Some(Value::Null) => {}
        Some(Value::String(title)) => definition.title = Some(title.clone()),
        Some(_) => {
            return Err(StructureError::InvalidDocument(
                "'title' must be a string".into(),
            ))
        }
    }

    tracing::debug!(
        questions = definition.questions.len(),
        start = %definition.start_id,
        "question graph parsed"
    );
    Ok(definition)
}

/// Read and parse a question graph file
pub fn load_definition<I: InterviewIo + ?Sized>(io: &I, path: &Path) -> Result<InterviewDefinition> {
    if !io.exists(path) {
        anyhow::bail!("Question file not found: {}", path.display());
    }
    let source = io
        .read_file(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_definition(&source).with_context(|| format!("Failed to load {}", path.display()))
}

/// The built-in interview
pub fn default_definition() -> std::result::Result<InterviewDefinition, StructureError> {
    parse_definition(DEFAULT_QUESTIONS)
}
