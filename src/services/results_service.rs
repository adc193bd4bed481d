//! Results service - plain-text dump of answers and flags

use crate::io::InterviewIo;
use crate::models::Answers;
use crate::Result;
use anyhow::Context;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::document_service::TIMESTAMP_FORMAT;

pub fn format_results(answers: &Answers, flags: &BTreeSet<String>) -> String {
    let mut content = String::from("DEFAULT JUDGMENT INTERVIEW RESULTS\n");
    content.push_str(&"=".repeat(40));
    content.push_str("\n\n");

    content.push_str("ANSWERS:\n");
    for (id, answer) in answers.iter() {
        match answer.as_list() {
            Some(items) => {
                content.push_str(&format!("{}:\n", id));
                for item in items {
                    content.push_str(&format!("  - {}\n", item));
                }
            }
            None => content.push_str(&format!("{}: {}\n", id, answer)),
        }
    }

    content.push_str("\nFLAGS TRIGGERED:\n");
    for flag in flags {
        content.push_str(&format!("- {}\n", flag));
    }
    content
}

/// Default file name, `interview_results_<timestamp>.txt`
pub fn default_results_name(now: NaiveDateTime) -> String {
    format!("interview_results_{}.txt", now.format(TIMESTAMP_FORMAT))
}

/// Write the results dump to `path`, or to `<dir>/interview_results_<timestamp>.txt`
pub fn save_results<I: InterviewIo + ?Sized>(
    io: &mut I,
    path: Option<&Path>,
    dir: &Path,
    answers: &Answers,
    flags: &BTreeSet<String>,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => io.join_path(dir, &default_results_name(now)),
    };

    io.write_file(&path, &format_results(answers, flags))
        .with_context(|| format!("Failed to save results to {}", path.display()))?;

    tracing::info!(path = %path.display(), "results saved");
    Ok(path)
}
