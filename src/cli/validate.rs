use crate::io::InterviewIo;
use crate::validator::{validate_definition, GraphReport};
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

/// Check a question graph without running it
pub fn run<I: InterviewIo + ?Sized>(io: &mut I, questions: Option<&Path>) -> Result<GraphReport> {
    let source = questions
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in questions".to_string());

    io.write_output(&format!("🔍 Validating {}...", source).cyan().to_string());

    let definition = super::load_questions(io, questions)?;
    let report = validate_definition(&definition)
        .with_context(|| format!("Invalid question graph in {}", source))?;

    io.write_output(
        &format!(
            "✅ {} questions, starting at '{}'",
            report.question_count, report.start_id
        )
        .green()
        .to_string(),
    );
    io.write_output(&format!("   Default path: {}", report.default_path.join(" → ")));

    if !report.unreachable.is_empty() {
        io.write_output(
            &format!(
                "⚠️ Unreachable from '{}': {}",
                report.start_id,
                report.unreachable.join(", ")
            )
            .yellow()
            .to_string(),
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ScriptedIo;

    #[test]
    fn test_validate_builtin() {
        let mut io = ScriptedIo::default();
        let report = run(&mut io, None).unwrap();

        assert_eq!(report.start_id, "case_number");
        assert!(io.contains_output("starting at 'case_number'"));
    }

    #[test]
    fn test_reports_unreachable() {
        let mut io = ScriptedIo::default().with_file(
            "/q.yaml",
            "questions:\n  - {id: a, type: text, prompt: A}\n  - {id: b, type: text, prompt: B}",
        );
        let report = run(&mut io, Some(Path::new("/q.yaml"))).unwrap();

        assert_eq!(report.unreachable, vec!["b"]);
        assert!(io.contains_output("Unreachable from 'a': b"));
    }

    #[test]
    fn test_cycle_is_an_error() {
        let mut io = ScriptedIo::default().with_file(
            "/q.yaml",
            "questions:\n  - {id: a, type: text, prompt: A, next: b}\n  - {id: b, type: text, prompt: B, next: a}",
        );
        let err = run(&mut io, Some(Path::new("/q.yaml"))).unwrap_err();
        assert!(format!("{:#}", err).contains("Circular reference detected in question flow: a -> b -> a"));
    }
}
