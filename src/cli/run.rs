use crate::config::AppConfig;
use crate::interview::{InterviewOutcome, InterviewRunner};
use crate::io::InterviewIo;
use crate::models::Resolution;
use crate::rules::{assess, resolve};
use crate::services::{save_results, write_summary, DocumentRenderer, RenderError};
use crate::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use colored::Colorize;
use std::path::PathBuf;

/// Options for `vacatur run`, config values already overridden by flags
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub questions: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub template: Option<PathBuf>,
    /// `Some(None)` saves under `results_dir` with a generated name
    pub save: Option<Option<PathBuf>>,
    pub results_dir: PathBuf,
    pub reference_date: Option<NaiveDate>,
    /// Timestamp for artifact names; now when unset
    pub generated_at: Option<NaiveDateTime>,
}

impl RunOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            questions: config.questions.clone(),
            output_dir: config.output_dir.clone(),
            template: config.template.clone(),
            save: None,
            results_dir: config.results_dir.clone(),
            reference_date: config.reference_date,
            generated_at: None,
        }
    }
}

/// What a completed run produced
#[derive(Debug)]
pub struct RunReport {
    pub outcome: InterviewOutcome,
    pub resolution: Resolution,
    pub document: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub results: Option<PathBuf>,
}

/// Run the interview, print the assessment, write the artifacts
///
/// A rendering failure is reported after everything else has been printed
/// and saved, then returned as the error.
pub fn run<I: InterviewIo + ?Sized>(io: &mut I, options: &RunOptions) -> Result<RunReport> {
    let mut engine = super::load_engine(io, options.questions.as_deref())?;
    if let Some(date) = options.reference_date {
        engine = engine.with_reference_date(date);
    }

    let title = engine
        .title()
        .unwrap_or("Default Judgment Interview")
        .to_string();
    io.write_output(&format!("📋 {}", title).cyan().bold().to_string());

    let outcome = InterviewRunner::new(engine, &mut *io).run()?;

    io.write_output("");
    io.write_output(&"📝 Initial Assessment:".bold().to_string());
    for note in assess(&outcome.flags) {
        io.write_output(&format!(" {}", note));
    }

    let resolution = resolve(&outcome.flags);
    print_resolution(io, &resolution);

    let generated_at = options
        .generated_at
        .unwrap_or_else(|| Local::now().naive_local());
    let mut report = RunReport {
        outcome,
        resolution,
        document: None,
        summary: None,
        results: None,
    };

    let renderer = DocumentRenderer::new(&options.output_dir)
        .with_template(options.template.clone())
        .with_timestamp(generated_at);
    let mut render_error: Option<RenderError> = None;
    if let Err(err) = write_documents(io, &renderer, &mut report) {
        tracing::warn!(error = %err, "document generation failed");
        io.write_output(&format!("❌ {}", err).red().to_string());
        render_error = Some(err);
    }

    if let Some(path) = &options.save {
        let saved = save_results(
            io,
            path.as_deref(),
            &options.results_dir,
            &report.outcome.answers,
            &report.outcome.flags,
            generated_at,
        );
        match (saved, render_error) {
            (Ok(saved), pending) => {
                io.write_output(
                    &format!("💾 Results saved to: {}", saved.display())
                        .green()
                        .to_string(),
                );
                report.results = Some(saved);
                render_error = pending;
            }
            // Both failed: report the save failure, return the render failure
            (Err(err), Some(render)) => {
                io.write_output(&format!("❌ {:#}", err).red().to_string());
                return Err(anyhow::Error::new(render).context("Failed to generate motion"));
            }
            (Err(err), None) => return Err(err),
        }
    }

    io.write_output("");
    io.write_output("👋 Thank you for using the Default Judgment Interview System.");

    match render_error {
        Some(err) => Err(anyhow::Error::new(err).context("Failed to generate motion")),
        None => Ok(report),
    }
}

fn write_documents<I: InterviewIo + ?Sized>(
    io: &mut I,
    renderer: &DocumentRenderer,
    report: &mut RunReport,
) -> std::result::Result<(), RenderError> {
    let document = renderer.render(io, &report.outcome.answers, &report.resolution)?;
    io.write_output(&format!("✅ Motion saved to: {}", document.display()).green().to_string());
    report.document = Some(document);

    let summary = write_summary(
        io,
        renderer,
        &report.outcome.answers,
        &report.resolution,
        &report.outcome.trail,
    )?;
    io.write_output(
        &format!("✅ Markdown summary saved to: {}", summary.display())
            .green()
            .to_string(),
    );
    report.summary = Some(summary);
    Ok(())
}

fn print_resolution<I: InterviewIo + ?Sized>(io: &mut I, resolution: &Resolution) {
    io.write_output("");
    if resolution.is_empty() {
        io.write_output(&"⚖️ No applicable statutes found".yellow().to_string());
        return;
    }
    io.write_output(&"⚖️ Applicable statutes:".bold().to_string());
    for matched in &resolution.statutes {
        io.write_output(&format!(
            "   • {} - {} ({})",
            matched.statute,
            matched.description,
            matched.flags.join(", ")
        ));
    }
}
