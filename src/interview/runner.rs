//! Interactive loop around the engine

use super::engine::{InterviewEngine, Transition};
use super::prompt::ask;
use crate::io::InterviewIo;
use crate::models::{AnswerError, Answers};
use crate::state::FlagEvent;
use anyhow::{Context, Result};
use std::collections::BTreeSet;

/// Everything a finished interview produced
#[derive(Debug, Clone)]
pub struct InterviewOutcome {
    pub answers: Answers,
    pub flags: BTreeSet<String>,
    pub trail: Vec<FlagEvent>,
    /// The summary node the interview ended on, if any
    pub summary_id: Option<String>,
}

/// Asks questions through an [`InterviewIo`] until the engine completes
pub struct InterviewRunner<'a, I: InterviewIo + ?Sized> {
    engine: InterviewEngine,
    io: &'a mut I,
}

impl<'a, I: InterviewIo + ?Sized> InterviewRunner<'a, I> {
    pub fn new(engine: InterviewEngine, io: &'a mut I) -> Self {
        Self { engine, io }
    }

    pub fn engine(&self) -> &InterviewEngine {
        &self.engine
    }

    /// Run to completion and print the interview summary
    pub fn run(mut self) -> Result<InterviewOutcome> {
        while let Some(question) = self.engine.current_question().cloned() {
            let answer = ask(&mut *self.io, &question)
                .with_context(|| format!("Failed to read answer for '{}'", question.id))?;

            match self.engine.process_answer(answer) {
                Ok(Transition::Retry { .. }) => {
                    self.io.write_output("⚠️ This question is required.");
                }
                Ok(Transition::Advance { .. }) => {}
                Err(AnswerError::Validation(err)) => {
                    tracing::debug!(
                        question_id = err.question_id(),
                        constraint = err.constraint(),
                        "answer rejected"
                    );
                    self.io.write_output(&format!("⚠️ {}", err));
                }
                Err(AnswerError::InterviewComplete) => break,
            }
        }

        let summary_prompt = self
            .engine
            .summary_question()
            .and_then(|q| q.prompt.clone());
        let summary_id = self.engine.summary_question().map(|q| q.id.clone());

        for line in summary_lines(self.engine.answers(), self.engine.flags()) {
            self.io.write_output(&line);
        }
        if let Some(prompt) = summary_prompt {
            self.io.write_output("");
            self.io.write_output(&format!("📋 {}", prompt));
        }

        let (answers, flags, trail) = self.engine.into_session().into_parts();
        Ok(InterviewOutcome {
            answers,
            flags,
            trail,
            summary_id,
        })
    }
}

/// Printable end-of-interview summary
pub fn summary_lines(answers: &Answers, flags: &BTreeSet<String>) -> Vec<String> {
    let rule = "=".repeat(50);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "📊 INTERVIEW SUMMARY".to_string(),
        rule,
        String::new(),
        "🧾 Collected Answers:".to_string(),
    ];

    for (id, answer) in answers.iter() {
        match answer.as_list() {
            Some(items) => {
                lines.push(format!(" - {}:", id));
                lines.extend(items.iter().map(|item| format!("   * {}", item)));
            }
            None => lines.push(format!(" - {}: {}", id, answer)),
        }
    }

    lines.push(String::new());
    lines.push("🚩 Flags Triggered:".to_string());
    if flags.is_empty() {
        lines.push(" (none)".to_string());
    }
    lines.extend(flags.iter().map(|flag| format!(" - {}", flag)));
    lines
}
