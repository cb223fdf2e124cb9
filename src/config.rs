use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::alerting::BroadcastPolicy;
use crate::scoring::RequestDefaults;

/// Errors that can occur while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Configuration for the risk scoring tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scoring configuration
    pub scoring: ScoringConfig,
    /// High-risk notice configuration
    pub alerting: BroadcastPolicy,
    /// Output configuration
    pub output: OutputConfig,
}

/// Scoring configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Seed for the random draws; omit for a fresh seed per run
    pub seed: Option<u64>,
    /// Fixed calendar month (1-12); omit to use the current month
    pub month: Option<u32>,
    /// Values used when a request leaves a field out
    pub defaults: RequestDefaults,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json", "jsonl", or "console"
    pub format: String,
    /// Output file path; stdout when absent
    pub file_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: "console".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(month) = self.scoring.month {
            if !(1..=12).contains(&month) {
                return Err(ConfigError::Invalid(format!(
                    "scoring.month must be 1-12, got {}",
                    month
                )));
            }
        }

        let threshold = self.alerting.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "alerting.threshold must be within [0, 1], got {}",
                threshold
            )));
        }

        Ok(())
    }
}
