use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the spike rule currently supported by the pipeline
pub const FAILED_SSH_SPIKE_RULE: &str = "failed_ssh_spike";

/// Errors that can occur while loading the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a single anomaly detector run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the syslog file to scan, relative to the deployment root
    pub log_file: PathBuf,
    /// Directory for the output artifacts, relative to the deployment root
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Spike rules keyed by rule name
    #[serde(default)]
    pub anomaly_rules: HashMap<String, RuleConfig>,
}

/// Configuration for one spike rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether the rule runs at all; a disabled rule skips the whole pipeline
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Literal, case-sensitive substring a line must contain to count
    #[serde(default = "default_match_substring")]
    pub match_substring: String,
    /// Maximum matches per minute before that minute is flagged
    #[serde(default = "default_max_per_minute")]
    pub max_per_minute: u64,
    /// strptime-style format of the syslog timestamp prefix (no year)
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("03_results")
}

fn default_enabled() -> bool {
    true
}

fn default_match_substring() -> String {
    "Failed password".to_string()
}

fn default_max_per_minute() -> u64 {
    5
}

fn default_time_format() -> String {
    "%b %d %H:%M:%S".to_string()
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            enabled: default_enabled(),
            match_substring: default_match_substring(),
            max_per_minute: default_max_per_minute(),
            time_format: default_time_format(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Configuration for the named rule
    ///
    /// A rule absent from `anomaly_rules` resolves to an all-default
    /// (enabled) rule rather than an error.
    pub fn rule(&self, name: &str) -> RuleConfig {
        self.anomaly_rules.get(name).cloned().unwrap_or_default()
    }
}
