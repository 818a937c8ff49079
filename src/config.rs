//! Configuration management for sqldrill.
//!
//! Handles loading configuration from a TOML file: where the practice
//! snapshots and the questions file live, and the default grading policy.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};
use crate::grade::CheckOptions;

/// Main configuration structure for sqldrill.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Data locations and snapshot display names.
    #[serde(default)]
    pub data: DataConfig,

    /// Default grading policy.
    #[serde(default)]
    pub grading: GradingConfig,
}

/// Locations of the practice data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory containing `.sqlite` snapshot files.
    #[serde(default = "default_databases_dir")]
    pub databases_dir: PathBuf,

    /// JSON file mapping snapshot filenames to question lists.
    #[serde(default = "default_questions_file")]
    pub questions_file: PathBuf,

    /// Friendly display names keyed by snapshot filename.
    #[serde(default)]
    pub display_names: HashMap<String, String>,
}

fn default_databases_dir() -> PathBuf {
    PathBuf::from("databases")
}

fn default_questions_file() -> PathBuf {
    PathBuf::from("questions.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            databases_dir: default_databases_dir(),
            questions_file: default_questions_file(),
            display_names: HashMap::new(),
        }
    }
}

/// Default grading policy, overridable per invocation on the CLI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct GradingConfig {
    /// Match rows as an unordered multiset.
    #[serde(default)]
    pub ignore_row_order: bool,

    /// Compare values positionally, ignoring column names.
    #[serde(default)]
    pub ignore_column_naming: bool,

    /// Numeric comparison tolerance. 0.0 means exact.
    #[serde(default)]
    pub float_epsilon: f64,
}

impl GradingConfig {
    /// Converts the configured policy into checker options.
    pub fn to_check_options(self) -> CheckOptions {
        CheckOptions {
            ignore_column_naming: self.ignore_column_naming,
            float_epsilon: self.float_epsilon,
            ignore_row_order: self.ignore_row_order,
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sqldrill")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DrillError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            DrillError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
