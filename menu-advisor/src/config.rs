//! Runtime configuration.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{AdvisorError, Result},
    extract::DEFAULT_MAX_DOCUMENT_BYTES,
};

/// Environment variable overriding [`AdvisorConfig::seed_path`]. Empty disables seeding.
pub const ENV_SEED: &str = "MENU_ADVISOR_SEED";
/// Environment variable overriding [`AdvisorConfig::max_document_bytes`].
pub const ENV_MAX_DOCUMENT_BYTES: &str = "MENU_ADVISOR_MAX_DOCUMENT_BYTES";
/// Environment variable overriding [`AdvisorConfig::reject_unknown_meal_types`].
pub const ENV_STRICT_MEAL_TYPES: &str = "MENU_ADVISOR_STRICT_MEAL_TYPES";

/// Configuration for a [`MenuAdvisor`](crate::MenuAdvisor).
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
///
/// # Examples
///
/// ```
/// use menu_advisor::config::AdvisorConfig;
///
/// let config: AdvisorConfig = serde_json::from_str(r#"{"max_document_bytes": 1024}"#).unwrap();
/// assert_eq!(config.max_document_bytes, 1024);
/// assert!(!config.reject_unknown_meal_types);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// JSON array of menus loaded at startup. `None` skips seeding.
    pub seed_path: Option<PathBuf>,
    /// Uploads larger than this are rejected during extraction.
    pub max_document_bytes: u64,
    /// Fail suggestions for meal types other than breakfast and dinner
    /// instead of returning a suggestion without dishes.
    pub reject_unknown_meal_types: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            seed_path: Some(PathBuf::from("data/school_lunch_sample.json")),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            reject_unknown_meal_types: false,
        }
    }
}

impl AdvisorConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents)
            .map_err(|e| AdvisorError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed_path = if seed.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(seed))
            };
        }

        if let Some(raw) = lookup(ENV_MAX_DOCUMENT_BYTES) {
            self.max_document_bytes = raw.trim().parse().map_err(|_| {
                AdvisorError::InvalidConfig(format!(
                    "{ENV_MAX_DOCUMENT_BYTES} must be a byte count, got '{raw}'"
                ))
            })?;
        }

        if let Some(raw) = lookup(ENV_STRICT_MEAL_TYPES) {
            self.reject_unknown_meal_types = parse_flag(&raw).ok_or_else(|| {
                AdvisorError::InvalidConfig(format!(
                    "{ENV_STRICT_MEAL_TYPES} must be true or false, got '{raw}'"
                ))
            })?;
        }

        Ok(self)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
