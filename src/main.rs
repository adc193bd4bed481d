use chrono::NaiveDate;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vacatur::cli::run::RunOptions;
use vacatur::{AppConfig, ConsoleIo, Result};

#[derive(Parser)]
#[command(name = "vacatur")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Default judgment intake interview and motion drafting", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ./vacatur.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interview and draft the motion
    Run {
        /// Question graph (YAML); the built-in interview when omitted
        #[arg(short, long)]
        questions: Option<PathBuf>,

        /// Directory for the motion and summary
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Handlebars template for the motion
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Save plain-text results, optionally to PATH
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        save: Option<Option<PathBuf>>,

        /// Measure date flags against this day instead of today (YYYY-MM-DD)
        #[arg(long, value_parser = parse_reference_date)]
        reference_date: Option<NaiveDate>,
    },

    /// Check a question graph for structural errors
    Validate {
        /// Question graph (YAML); the built-in interview when omitted
        #[arg(short, long)]
        questions: Option<PathBuf>,
    },

    /// Show which statutes a set of flags supports
    Statutes {
        /// Flags to resolve
        #[arg(value_name = "FLAG")]
        flags: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_reference_date(value: &str) -> std::result::Result<NaiveDate, String> {
    vacatur::flags::parse_date(value).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", value))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(cli.config.as_deref(), &cwd)?;
    init_logging(cli.verbose, &config.log_level);

    let mut console = ConsoleIo::new();

    match cli.command {
        Commands::Run {
            questions,
            output_dir,
            template,
            save,
            reference_date,
        } => {
            let mut options = RunOptions::from_config(&config);
            if questions.is_some() {
                options.questions = questions;
            }
            if let Some(dir) = output_dir {
                options.output_dir = dir;
            }
            if template.is_some() {
                options.template = template;
            }
            if reference_date.is_some() {
                options.reference_date = reference_date;
            }
            options.save = save;

            vacatur::cli::run::run(&mut console, &options)?;
        }
        Commands::Validate { questions } => {
            let questions = questions.or(config.questions);
            vacatur::cli::validate::run(&mut console, questions.as_deref())?;
        }
        Commands::Statutes { flags, json } => {
            vacatur::cli::statutes::run(&mut console, &flags, json)?;
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "vacatur", &mut io::stdout());
        }
    }

    Ok(())
}

/// RUST_LOG wins, then `-v`, then the configured level
fn init_logging(verbose: u8, configured: &str) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = match verbose {
                0 => configured,
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
