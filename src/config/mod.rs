//! Configuration models for .kamikaya/config.json.
//!
//! Every section falls back to its defaults, so a missing file or a partial
//! file both load cleanly.

pub mod field;
pub mod metadata;
mod validation;

use serde::{Deserialize, Serialize};

pub use field::{ConfigField, FieldError};
use std::fs;
use std::path::{Path, PathBuf};

use crate::draft::LoanAmount;
use crate::wizard::{WizardPolicy, DEFAULT_ACKNOWLEDGMENT};

/// Default config directory path.
pub const KAMIKAYA_DIR: &str = ".kamikaya";
/// Default config file path.
pub const CONFIG_FILE: &str = ".kamikaya/config.json";
/// Default log file path.
pub const LOG_FILE: &str = ".kamikaya/kamikaya.log";
/// Default process descriptor path.
pub const PROCESS_FILE: &str = "deploy/process.toml";

/// Loan slider settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanConfig {
    /// Amount the slider starts at.
    #[serde(default)]
    pub default_amount: LoanAmount,
}

/// Submission behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Refuse submission until the terms box is ticked.
    #[serde(default)]
    pub require_terms: bool,
    /// Clear the draft on submission instead of only returning to step 1.
    #[serde(default)]
    pub clear_draft: bool,
    /// Acknowledgment text.
    #[serde(default = "default_acknowledgment")]
    pub acknowledgment: String,
}

fn default_acknowledgment() -> String {
    DEFAULT_ACKNOWLEDGMENT.to_string()
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            require_terms: false,
            clear_draft: false,
            acknowledgment: default_acknowledgment(),
        }
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Redraw interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Show the long introduction text on the first step.
    #[serde(default = "default_true")]
    pub show_intro: bool,
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            show_intro: default_true(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "kamikaya=debug".
    #[serde(default = "default_log_level")]
    pub level: String,
    /// File the log is appended to.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    LOG_FILE.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration for kamikaya.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KamikayaConfig {
    /// Loan slider settings.
    #[serde(default)]
    pub loan: LoanConfig,
    /// Submission settings.
    #[serde(default)]
    pub submission: SubmissionConfig,
    /// Terminal UI settings.
    #[serde(default)]
    pub tui: TuiConfig,
    /// Log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the config file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file JSON.
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl KamikayaConfig {
    /// Load configuration from a file, or return defaults if file doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to config file. Defaults to `.kamikaya/config.json` if None.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: KamikayaConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories as needed.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the path for the config file.
    pub fn config_file() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Wizard policy derived from these settings.
    pub fn wizard_policy(&self) -> WizardPolicy {
        WizardPolicy::from_config(&self.submission, self.loan.default_amount)
    }

    /// Get a config value by dot-notation path (e.g., "tui.tick_rate_ms").
    pub fn get_by_path(&self, path: &str) -> Result<String, FieldError> {
        let (section, key) = field::split_path(path)?;
        let value = match section {
            "loan" => self.loan.get_field(key),
            "submission" => self.submission.get_field(key),
            "tui" => self.tui.get_field(key),
            "logging" => self.logging.get_field(key),
            _ => None,
        };
        value.ok_or_else(|| FieldError::UnknownKey(path.into()))
    }

    /// Set a config value by dot-notation path.
    pub fn set_by_path(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        match section {
            "loan" => self.loan.set_field(key, value),
            "submission" => self.submission.set_field(key, value),
            "tui" => self.tui.set_field(key, value),
            "logging" => self.logging.set_field(key, value),
            _ => Err(FieldError::UnknownKey(path.into())),
        }
    }

    /// List all section names.
    pub fn section_names() -> &'static [&'static str] {
        &["loan", "submission", "tui", "logging"]
    }

    /// Get all field names for a section.
    pub fn fields_for_section(section: &str) -> Option<&'static [&'static str]> {
        match section {
            "loan" => Some(LoanConfig::field_names()),
            "submission" => Some(SubmissionConfig::field_names()),
            "tui" => Some(TuiConfig::field_names()),
            "logging" => Some(LoggingConfig::field_names()),
            _ => None,
        }
    }

    /// List all valid config keys as dot-notation paths.
    pub fn all_keys() -> Vec<String> {
        let mut keys = Vec::new();
        for section in Self::section_names() {
            if let Some(fields) = Self::fields_for_section(section) {
                for field in fields {
                    keys.push(format!("{section}.{field}"));
                }
            }
        }
        keys
    }

    /// Reset a section to its default values.
    pub fn reset_section(&mut self, section: &str) -> Result<(), FieldError> {
        match section {
            "loan" => self.loan = LoanConfig::default(),
            "submission" => self.submission = SubmissionConfig::default(),
            "tui" => self.tui = TuiConfig::default(),
            "logging" => self.logging = LoggingConfig::default(),
            _ => return Err(FieldError::UnknownKey(section.into())),
        }
        Ok(())
    }

    /// Reset a specific field to its default value.
    pub fn reset_field(&mut self, path: &str) -> Result<(), FieldError> {
        let default = Self::default();
        let value = default.get_by_path(path)?;
        self.set_by_path(path, &value)
    }
}
