//! Configuration file
//!
//! JSON, every field optional. Command-line flags override config values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::planner::PageSize;

use super::errors::{CliError, CliResult};

/// Output format for one-shot commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{"status":"ok","data":...}` envelope
    #[default]
    Json,
    /// Fixed-width text table
    Table,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dataset file used when `--data` is not given
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Page size for new queries (10, 25 or 50)
    #[serde(default)]
    pub default_page_size: PageSize,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format (optional, default "json")
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            default_page_size: PageSize::default(),
            log_level: default_log_level(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Dataset path: the command-line value wins over `data_file`
    pub fn dataset_path<'a>(&'a self, cli_value: Option<&'a Path>) -> CliResult<&'a Path> {
        cli_value
            .or(self.data_file.as_deref())
            .ok_or_else(CliError::no_dataset)
    }
}
