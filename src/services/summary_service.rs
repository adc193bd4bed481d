//! Summary service - markdown summary written next to the motion document

use super::document_service::{DocumentRenderer, RenderError};
use crate::io::InterviewIo;
use crate::models::{Answers, Resolution};
use crate::state::FlagEvent;
use chrono::NaiveDateTime;
use std::path::PathBuf;

/// Build the markdown summary
pub fn format_summary(
    answers: &Answers,
    resolution: &Resolution,
    trail: &[FlagEvent],
    generated_at: NaiveDateTime,
) -> String {
    let mut content = String::from("# 🧾 Motion to Vacate: Interview Summary\n\n");
    content.push_str(&format!(
        "## 📅 Date Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    if resolution.is_empty() {
        content.push_str("## 📜 No Applicable Statutes Found\n");
        content.push_str("No potential statutes found based on the provided answers.\n\n");
    } else {
        content.push_str("## 📜 Recommended Statutes\n");
        for matched in &resolution.statutes {
            content.push_str(&format!("- **{}** - {}\n", matched.statute, matched.description));
            for flag in &matched.flags {
                content.push_str(&format!("  - Reason: {}\n", flag));
            }
        }
        content.push('\n');
    }

    content.push_str("## 👤 Interview Answers\n");
    if answers.is_empty() {
        content.push_str("No interview answers recorded.\n");
    }
    for (id, answer) in answers.iter() {
        match answer.as_list() {
            Some(items) => {
                content.push_str(&format!("- **{}:**\n", id));
                for item in items {
                    content.push_str(&format!("  - {}\n", item));
                }
            }
            None => content.push_str(&format!("- **{}**: {}\n", id, answer)),
        }
    }

    if !trail.is_empty() {
        content.push_str("\n## 🚩 Flag Trail\n");
        for event in trail {
            content.push_str(&format!(
                "- `{}` from **{}** ({})\n",
                event.flag, event.question_id, event.source
            ));
        }
    }

    content
}

/// Write `motion_summary_<timestamp>.md` beside the renderer's document
pub fn write_summary<I: InterviewIo + ?Sized>(
    io: &mut I,
    renderer: &DocumentRenderer,
    answers: &Answers,
    resolution: &Resolution,
    trail: &[FlagEvent],
) -> Result<PathBuf, RenderError> {
    let path = renderer.artifact_path("motion_summary", "md");
    let content = format_summary(answers, resolution, trail, renderer.generated_at());
    io.write_file(&path, &content)
        .map_err(|e| RenderError::io(&path, e))?;

    tracing::info!(path = %path.display(), "markdown summary written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ScriptedIo;
    use crate::models::{Answer, StatuteMatch};
    use crate::state::FlagSource;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_summary_with_statutes() {
        let answers: Answers = vec![
            ("served", Answer::Bool(false)),
            (
                "household",
                Answer::List(vec!["Minor children".to_string()]),
            ),
        ]
        .into_iter()
        .collect();
        let resolution = Resolution {
            statutes: vec![StatuteMatch {
                statute: "CCP § 473.5".to_string(),
                description: "Lack of actual notice of the lawsuit".to_string(),
                flags: vec!["no_actual_notice".to_string()],
            }],
        };
        let trail = vec![FlagEvent {
            question_id: "served".to_string(),
            flag: "no_actual_notice".to_string(),
            source: FlagSource::Branch,
        }];

        let text = format_summary(&answers, &resolution, &trail, timestamp());

        assert!(text.contains("## 📅 Date Generated: 2024-06-15 09:30:05"));
        assert!(text.contains("## 📜 Recommended Statutes"));
        assert!(text.contains("- **CCP § 473.5** - Lack of actual notice of the lawsuit"));
        assert!(text.contains("  - Reason: no_actual_notice"));
        assert!(text.contains("- **served**: no"));
        assert!(text.contains("- **household:**\n  - Minor children"));
        assert!(text.contains("- `no_actual_notice` from **served** (branch)"));
    }

    #[test]
    fn test_summary_without_statutes_or_answers() {
        let text = format_summary(&Answers::new(), &Resolution::default(), &[], timestamp());
        assert!(text.contains("## 📜 No Applicable Statutes Found"));
        assert!(text.contains("No interview answers recorded."));
        assert!(!text.contains("Flag Trail"));
    }

    #[test]
    fn test_write_summary_path() {
        let mut io = ScriptedIo::default();
        let renderer = DocumentRenderer::new("/out").with_timestamp(timestamp());

        let path = write_summary(&mut io, &renderer, &Answers::new(), &Resolution::default(), &[])
            .unwrap();
        assert_eq!(path, PathBuf::from("/out/motion_summary_20240615_093005.md"));
        assert!(io.file(&path).is_some());
    }
}
