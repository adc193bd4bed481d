use crate::io::InterviewIo;
use crate::models::Resolution;
use crate::rules::{resolve, STATUTE_RULES};
use crate::Result;
use colored::Colorize;
use std::collections::BTreeSet;

/// Resolve statutes for flags given on the command line
pub fn run<I: InterviewIo + ?Sized>(io: &mut I, flags: &[String], json: bool) -> Result<Resolution> {
    let flags: BTreeSet<String> = flags.iter().map(|f| f.trim().to_string()).collect();
    let resolution = resolve(&flags);

    if json {
        io.write_output(&serde_json::to_string_pretty(&resolution)?);
        return Ok(resolution);
    }

    if resolution.is_empty() {
        io.write_output(&"No applicable statutes found".yellow().to_string());
    }
    for matched in &resolution.statutes {
        io.write_output(&format!("⚖️ {}", matched.statute).bold().to_string());
        io.write_output(&format!("   {}", matched.description));
        for flag in &matched.flags {
            io.write_output(&format!("   • {}", flag));
        }
    }

    let unknown: Vec<&str> = flags
        .iter()
        .map(String::as_str)
        .filter(|flag| !STATUTE_RULES.iter().any(|rule| rule.flags.contains(flag)))
        .collect();
    if !unknown.is_empty() {
        io.write_output(
            &format!("Ignored flags with no statute: {}", unknown.join(", "))
                .dimmed()
                .to_string(),
        );
    }

    Ok(resolution)
}
