//! Application configuration (vacatur.toml)
//!
//! Lookup order: `--config PATH`, `./vacatur.toml`, then
//! `<config dir>/vacatur/config.toml`. Without any file the defaults apply.
//! Command-line flags override whatever is loaded here.

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = "vacatur.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Question graph file; the built-in interview when unset
    #[serde(default)]
    pub questions: Option<PathBuf>,

    /// Where the motion document and summary are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Handlebars template for the motion; the built-in one when unset
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Where `--save` writes when no path is given
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Log filter used when neither `-v` nor `RUST_LOG` is set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Date that date flags are measured against, written as "YYYY-MM-DD"
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output/documents")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            questions: None,
            output_dir: default_output_dir(),
            template: None,
            results_dir: default_results_dir(),
            log_level: default_log_level(),
            reference_date: None,
        }
    }
}

impl AppConfig {
    /// Load the first config file found, or the defaults
    ///
    /// An explicit path must exist.
    pub fn load(explicit: Option<&Path>, project_root: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Self::from_file(path);
        }

        let local = project_root.join(CONFIG_FILE);
        if local.exists() {
            return Self::from_file(&local);
        }

        if let Some(global) = dirs::config_dir().map(|dir| dir.join("vacatur").join("config.toml")) {
            if global.exists() {
                return Self::from_file(&global);
            }
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}
