//! Document service - renders the motion document from a handlebars template

use crate::io::InterviewIo;
use crate::models::{Answers, Resolution};
use chrono::{Local, NaiveDateTime};
use handlebars::Handlebars;
use serde_json::{json, Value};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Template used when no template file is configured
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/motion.hbs");

/// File-name timestamp, shared by every artifact of one run
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template file not found at {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        RenderError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Renders the motion document into an output directory
pub struct DocumentRenderer {
    handlebars: Handlebars<'static>,
    template: Option<PathBuf>,
    output_dir: PathBuf,
    generated_at: NaiveDateTime,
}

impl DocumentRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        Self {
            handlebars,
            template: None,
            output_dir: output_dir.into(),
            generated_at: Local::now().naive_local(),
        }
    }

    /// Render with a template file instead of the built-in one
    pub fn with_template(mut self, template: Option<PathBuf>) -> Self {
        self.template = template;
        self
    }

    /// Fix the generation time used in file names and the document body
    pub fn with_timestamp(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    /// `<output_dir>/<prefix>_<timestamp>.<extension>`
    pub fn artifact_path(&self, prefix: &str, extension: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}.{}",
            prefix,
            self.generated_at.format(TIMESTAMP_FORMAT),
            extension
        ))
    }

    fn load_template<I: InterviewIo + ?Sized>(&self, io: &I) -> Result<String, RenderError> {
        match &self.template {
            None => Ok(DEFAULT_TEMPLATE.to_string()),
            Some(path) if !io.exists(path) => Err(RenderError::TemplateNotFound(path.clone())),
            Some(path) => io.read_file(path).map_err(|e| RenderError::io(path, e)),
        }
    }

    /// Render the document text without writing it
    pub fn render_text<I: InterviewIo + ?Sized>(
        &self,
        io: &I,
        answers: &Answers,
        resolution: &Resolution,
    ) -> Result<String, RenderError> {
        let template = self.load_template(io)?;
        let context = document_context(answers, resolution, self.generated_at);
        self.handlebars
            .render_template(&template, &context)
            .map_err(|e| RenderError::Template(e.to_string()))
    }

    /// Render and write `motion_to_vacate_<timestamp>.md`, returning its path
    pub fn render<I: InterviewIo + ?Sized>(
        &self,
        io: &mut I,
        answers: &Answers,
        resolution: &Resolution,
    ) -> Result<PathBuf, RenderError> {
        let text = self.render_text(io, answers, resolution)?;
        let path = self.artifact_path("motion_to_vacate", "md");
        io.write_file(&path, &text)
            .map_err(|e| RenderError::io(&path, e))?;

        tracing::info!(path = %path.display(), "motion document written");
        Ok(path)
    }
}

/// Template context
///
/// - `statute_list`: statute ids joined with ", "
/// - `statutes`: `[{statute, description, flags}]`
/// - `has_statutes`: whether any statute applies
/// - `facts`: one `id: answer` line per answer
/// - `answers`: `[{id, value, items}]`, `items` set for list answers
/// - `generated_at`: `YYYY-MM-DD HH:MM:SS`
pub fn document_context(
    answers: &Answers,
    resolution: &Resolution,
    generated_at: NaiveDateTime,
) -> Value {
    let facts = answers
        .iter()
        .map(|(id, answer)| format!("{}: {}", id, answer))
        .collect::<Vec<_>>()
        .join("\n");

    let answer_rows: Vec<Value> = answers
        .iter()
        .map(|(id, answer)| {
            json!({
                "id": id,
                "value": answer.to_string(),
                "items": answer.as_list(),
            })
        })
        .collect();

    json!({
        "statute_list": resolution.statute_ids().join(", "),
        "statutes": resolution.statutes,
        "has_statutes": !resolution.is_empty(),
        "facts": facts,
        "answers": answer_rows,
        "generated_at": generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}
