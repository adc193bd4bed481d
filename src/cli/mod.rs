pub mod run;
pub mod statutes;
pub mod validate;

use crate::interview::InterviewEngine;
use crate::io::InterviewIo;
use crate::models::InterviewDefinition;
use crate::parser::{default_definition, load_definition};
use crate::Result;
use anyhow::Context;
use std::path::Path;

/// Load the question graph at `path`, or the built-in interview
pub fn load_questions<I: InterviewIo + ?Sized>(
    io: &I,
    path: Option<&Path>,
) -> Result<InterviewDefinition> {
    match path {
        Some(path) => load_definition(io, path),
        None => default_definition().context("Built-in question graph is invalid"),
    }
}

/// Load and structurally validate a question graph
pub fn load_engine<I: InterviewIo + ?Sized>(io: &I, path: Option<&Path>) -> Result<InterviewEngine> {
    let definition = load_questions(io, path)?;
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in questions".to_string());
    InterviewEngine::new(definition).with_context(|| format!("Invalid question graph in {}", source))
}
