//! Command-line front end.
//!
//! Output is JSON. Uploads report a `{success, message | error, result}`
//! envelope where `result` is the document record.

use std::{
    env,
    fs::File,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use crate::{config::AdvisorConfig, error::Result, model::DocumentKind, MenuAdvisor};

/// JSON printed on success, or on failure before exiting non-zero.
pub type Outcome = std::result::Result<Value, Value>;

#[derive(Debug, Parser)]
#[command(
    name = "menu-advisor",
    version,
    about = "Ingest school lunch menus and suggest home meals that complement them"
)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed file to load at startup, overriding the configuration
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Ingest FILE before running the command (repeatable)
    #[arg(long = "upload", value_name = "FILE")]
    pub uploads: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every stored school lunch
    List,
    /// Ingest a document and print its record
    Upload {
        path: PathBuf,
        /// Document kind, overriding the file extension (json, pdf_text, pdf_image, image)
        #[arg(long, value_parser = parse_kind)]
        kind: Option<DocumentKind>,
    },
    /// Suggest a home meal for a day
    Suggest {
        /// Day as YYYY-MM-DD
        date: String,
        /// breakfast or dinner
        meal_type: String,
    },
}

fn parse_kind(raw: &str) -> std::result::Result<DocumentKind, String> {
    raw.parse::<DocumentKind>().map_err(|e| e.to_string())
}

impl Cli {
    /// Builds the configuration from `--config`, the environment and `--seed`.
    pub fn load_config(&self) -> Result<AdvisorConfig> {
        self.config_with(|key| env::var(key).ok())
    }

    fn config_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<AdvisorConfig> {
        let mut config = match &self.config {
            Some(path) => AdvisorConfig::from_file(path)?,
            None => AdvisorConfig::default(),
        }
        .with_overrides(lookup)?;

        if let Some(seed) = &self.seed {
            config.seed_path = Some(seed.clone());
        }
        Ok(config)
    }

    /// Loads configuration, starts an advisor and runs the command.
    pub fn run(&self) -> Outcome {
        let config = self
            .load_config()
            .map_err(|e| json!({"error": e.to_string()}))?;
        self.execute(&MenuAdvisor::bootstrap(&config))
    }

    /// Runs `--upload` files and then the command against `advisor`.
    ///
    /// Stops at the first failed upload.
    pub fn execute(&self, advisor: &MenuAdvisor) -> Outcome {
        for path in &self.uploads {
            upload(advisor, path, None)?;
        }

        match &self.command {
            Command::List => Ok(json!(advisor.list_menus())),
            Command::Upload { path, kind } => upload(advisor, path, *kind),
            Command::Suggest { date, meal_type } => advisor
                .suggest_iso(date, meal_type)
                .map(|s| json!(s))
                .map_err(|e| json!({"error": e.to_string()})),
        }
    }
}

/// Ingests the file at `path` and wraps the outcome in an upload envelope.
pub fn upload(advisor: &MenuAdvisor, path: &Path, kind: Option<DocumentKind>) -> Outcome {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut file = File::open(path).map_err(|e| {
        json!({"success": false, "error": format!("{}: {}", path.display(), e)})
    })?;

    match advisor.process_document(kind, &filename, &mut file) {
        Ok(done) => Ok(json!({
            "success": true,
            "message": "Document processed successfully",
            "menus": done.menu_count,
            "result": done.document,
        })),
        Err(e) => Err(json!({
            "success": false,
            "error": e.to_string(),
            "result": e.document,
        })),
    }
}
