//! Log setup.
//!
//! The terminal UI owns stdout and stderr while it runs, so log lines are
//! appended to a file instead.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "KAMIKAYA_LOG";

/// Error type for log setup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    Filter {
        /// The rejected directive.
        value: String,
        /// Parser error.
        #[source]
        source: ParseError,
    },

    /// The log file could not be opened.
    #[error("failed to open log file {}: {source}", path.display())]
    File {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed.
    #[error("logging error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Build the filter, preferring `KAMIKAYA_LOG` over the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|source| LoggingError::Filter {
            value: config.level.clone(),
            source,
        }),
    }
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let wrap = |source| LoggingError::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(wrap)
}

/// Install the global subscriber, appending to the configured log file.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;
    let file = open_log_file(Path::new(&config.file))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(LoggingError::Subscriber)
}

/// Install the global subscriber on stderr, for commands that leave stdout
/// to their own output.
pub fn init_stderr(config: &LoggingConfig) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config)?)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(LoggingError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_filter_from_config() {
        // Skip when the override is set in the surrounding environment.
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "kamikaya=debug".into(),
            ..LoggingConfig::default()
        };
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("kamikaya=debug"));
    }

    #[test]
    fn test_build_filter_rejects_bad_level() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "kamikaya=loud".into(),
            ..LoggingConfig::default()
        };
        let err = build_filter(&config).unwrap_err();
        assert!(err.to_string().contains("kamikaya=loud"));
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs/nested/kamikaya.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
