//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use pulse_aggregate::AggregatorConfig;
use pulse_domain::RunMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Aggregation parameters
    #[serde(default)]
    pub pipeline: AggregatorConfig,

    /// Run behaviour
    #[serde(default)]
    pub run: RunSettings,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Run behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    /// Default run mode
    #[serde(default)]
    pub mode: RunMode,

    /// Days of rows sourced by an incremental run
    #[serde(default = "default_incremental_days")]
    pub incremental_days: u32,
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Event rows file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Country names file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<PathBuf>,

    /// Output directory
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Output file name
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".pulse").join("config.toml"))
    }

    /// Resolve the configuration file path.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration.
    ///
    /// A missing file at the default location gives the defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit)?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Self::from_toml(&contents)
        } else if explicit.is_some() {
            Err(CliError::Config(format!("Config file not found: {}", path.display())))
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate().map_err(CliError::Config)?;
        if self.run.incremental_days == 0 {
            return Err(CliError::Config("run.incremental_days must be greater than 0".into()));
        }
        if self.paths.output_file.trim().is_empty() {
            return Err(CliError::Config("paths.output_file must not be empty".into()));
        }
        Ok(())
    }

    /// Path of the summary document.
    pub fn document_path(&self) -> PathBuf {
        self.paths.output_dir.join(&self.paths.output_file)
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            incremental_days: default_incremental_days(),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input: None,
            countries: None,
            output_dir: default_output_dir(),
            output_file: default_output_file(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_incremental_days() -> u32 {
    7
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_output_file() -> String {
    "pulse_data.json".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
