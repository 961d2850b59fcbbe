//! Process-manager descriptor for the KamiKaya backend.
//!
//! The wizard never talks to the backend. This module only models the
//! deployment entry that keeps it running, loaded from `deploy/process.toml`
//! and rendered to the process manager's `ecosystem.config.js` format.

mod ecosystem;

pub use ecosystem::ECOSYSTEM_TEMPLATE;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PROCESS_FILE;

/// Error type for process descriptor operations.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// File I/O error.
    #[error("Failed to read process file: {0}")]
    IoError(#[from] std::io::Error),
    /// The descriptor is not valid TOML.
    #[error("Failed to parse process TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Tera template rendering error.
    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),
}

/// A problem found by [`ProcessDescriptor::check`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessIssue {
    /// `name` is blank.
    #[error("name is empty")]
    EmptyName,
    /// `script` is blank.
    #[error("script is empty")]
    EmptyScript,
    /// `instances` is zero.
    #[error("instances must be at least 1")]
    ZeroInstances,
    /// `max_memory_restart` is not a number with an optional K/M/G suffix.
    #[error("max_memory_restart '{0}' is not a size such as 512M or 1G")]
    BadMemoryLimit(String),
    /// `args` carry no `--port`.
    #[error("args do not set --port")]
    MissingPort,
    /// `--port` is followed by something that is not a port number.
    #[error("--port value '{0}' is not a valid port")]
    InvalidPort(String),
}

fn default_name() -> String {
    "kamikaya-backend".to_string()
}

fn default_script() -> String {
    "backend/venv/bin/python".to_string()
}

fn default_args() -> String {
    "-m uvicorn main:app --host 0.0.0.0 --port 8001".to_string()
}

fn default_cwd() -> String {
    "/var/www/kamikaya".to_string()
}

fn default_instances() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_memory() -> String {
    "1G".to_string()
}

fn default_env() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("NODE_ENV".to_string(), "production".to_string()),
        (
            "PYTHONPATH".to_string(),
            "/var/www/kamikaya/backend".to_string(),
        ),
    ])
}

fn default_error_file() -> String {
    "./logs/backend-err.log".to_string()
}

fn default_out_file() -> String {
    "./logs/backend-out.log".to_string()
}

fn default_log_file() -> String {
    "./logs/backend-combined.log".to_string()
}

/// One supervised process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Process name shown by the manager.
    #[serde(default = "default_name")]
    pub name: String,
    /// Executable to launch.
    #[serde(default = "default_script")]
    pub script: String,
    /// Arguments, as one shell-style string.
    #[serde(default = "default_args")]
    pub args: String,
    /// Working directory.
    #[serde(default = "default_cwd")]
    pub cwd: String,
    /// Number of instances.
    #[serde(default = "default_instances")]
    pub instances: u32,
    /// Restart on exit.
    #[serde(default = "default_true")]
    pub autorestart: bool,
    /// Restart on file changes.
    #[serde(default)]
    pub watch: bool,
    /// Memory threshold that triggers a restart, e.g. "1G".
    #[serde(default = "default_memory")]
    pub max_memory_restart: String,
    /// Environment variables.
    #[serde(default = "default_env")]
    pub env: BTreeMap<String, String>,
    /// Stderr log path.
    #[serde(default = "default_error_file")]
    pub error_file: String,
    /// Stdout log path.
    #[serde(default = "default_out_file")]
    pub out_file: String,
    /// Combined log path.
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Prefix log lines with timestamps.
    #[serde(default = "default_true")]
    pub time: bool,
}

impl Default for ProcessDescriptor {
    fn default() -> Self {
        Self {
            name: default_name(),
            script: default_script(),
            args: default_args(),
            cwd: default_cwd(),
            instances: default_instances(),
            autorestart: true,
            watch: false,
            max_memory_restart: default_memory(),
            env: default_env(),
            error_file: default_error_file(),
            out_file: default_out_file(),
            log_file: default_log_file(),
            time: true,
        }
    }
}

impl ProcessDescriptor {
    fn port_arg(&self) -> Option<&str> {
        let mut parts = self.args.split_whitespace();
        while let Some(part) = parts.next() {
            if part == "--port" {
                return Some(parts.next().unwrap_or(""));
            }
            if let Some(value) = part.strip_prefix("--port=") {
                return Some(value);
            }
        }
        None
    }

    /// Port passed via `--port N` or `--port=N`.
    pub fn port(&self) -> Option<u16> {
        self.port_arg()?.parse().ok().filter(|port| *port != 0)
    }

    /// Memory threshold in bytes. Accepts a plain byte count or a K/M/G suffix.
    pub fn memory_limit_bytes(&self) -> Option<u64> {
        let raw = self.max_memory_restart.trim();
        let (digits, multiplier) = match raw.char_indices().last()? {
            (i, 'K' | 'k') => (&raw[..i], 1024),
            (i, 'M' | 'm') => (&raw[..i], 1024 * 1024),
            (i, 'G' | 'g') => (&raw[..i], 1024 * 1024 * 1024),
            _ => (raw, 1),
        };
        let value: u64 = digits.parse().ok()?;
        if value == 0 {
            return None;
        }
        value.checked_mul(multiplier)
    }

    /// List everything wrong with this entry. Empty means deployable.
    pub fn check(&self) -> Vec<ProcessIssue> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push(ProcessIssue::EmptyName);
        }
        if self.script.trim().is_empty() {
            issues.push(ProcessIssue::EmptyScript);
        }
        if self.instances == 0 {
            issues.push(ProcessIssue::ZeroInstances);
        }
        if self.memory_limit_bytes().is_none() {
            issues.push(ProcessIssue::BadMemoryLimit(self.max_memory_restart.clone()));
        }
        match self.port_arg() {
            None => issues.push(ProcessIssue::MissingPort),
            Some(value) if self.port().is_none() => {
                issues.push(ProcessIssue::InvalidPort(value.to_string()))
            }
            Some(_) => {}
        }
        issues
    }
}

/// The descriptor file: a list of `[[apps]]` tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessFile {
    /// Supervised processes.
    #[serde(default)]
    pub apps: Vec<ProcessDescriptor>,
}

impl Default for ProcessFile {
    fn default() -> Self {
        Self {
            apps: vec![ProcessDescriptor::default()],
        }
    }
}

impl ProcessFile {
    /// Load from a TOML file, or return the default backend entry if the
    /// file doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the descriptor. Defaults to `deploy/process.toml` if None.
    pub fn load(path: Option<&Path>) -> Result<Self, ProcessError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(PROCESS_FILE));

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no process file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let file: ProcessFile = toml::from_str(&contents)?;
        Ok(file)
    }

    /// Serialise back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Problems per app, skipping apps without any.
    pub fn check(&self) -> Vec<(String, Vec<ProcessIssue>)> {
        self.apps
            .iter()
            .map(|app| (app.name.clone(), app.check()))
            .filter(|(_, issues)| !issues.is_empty())
            .collect()
    }

    /// Render the process manager's `ecosystem.config.js`.
    pub fn render_ecosystem(&self) -> Result<String, ProcessError> {
        ecosystem::render(&self.apps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_deployment() {
        let app = ProcessDescriptor::default();
        assert_eq!(app.name, "kamikaya-backend");
        assert_eq!(app.script, "backend/venv/bin/python");
        assert_eq!(app.cwd, "/var/www/kamikaya");
        assert_eq!(app.instances, 1);
        assert!(app.autorestart);
        assert!(!app.watch);
        assert_eq!(app.env["NODE_ENV"], "production");
        assert_eq!(app.env["PYTHONPATH"], "/var/www/kamikaya/backend");
        assert_eq!(app.log_file, "./logs/backend-combined.log");
        assert!(app.time);
        assert!(app.check().is_empty());
    }

    #[test]
    fn test_port_parsing() {
        let mut app = ProcessDescriptor::default();
        assert_eq!(app.port(), Some(8001));

        app.args = "-m uvicorn main:app --port=9000".into();
        assert_eq!(app.port(), Some(9000));

        app.args = "-m uvicorn main:app --port".into();
        assert_eq!(app.port(), None);
        assert_eq!(app.check(), vec![ProcessIssue::InvalidPort(String::new())]);

        app.args = "-m uvicorn main:app".into();
        assert_eq!(app.port(), None);
        assert_eq!(app.check(), vec![ProcessIssue::MissingPort]);

        app.args = "--port 70000".into();
        assert_eq!(
            app.check(),
            vec![ProcessIssue::InvalidPort("70000".into())]
        );
    }

    #[test]
    fn test_memory_limit_bytes() {
        let mut app = ProcessDescriptor::default();
        assert_eq!(app.memory_limit_bytes(), Some(1_073_741_824));

        app.max_memory_restart = "512M".into();
        assert_eq!(app.memory_limit_bytes(), Some(512 * 1024 * 1024));

        app.max_memory_restart = "300k".into();
        assert_eq!(app.memory_limit_bytes(), Some(300 * 1024));

        app.max_memory_restart = "2048".into();
        assert_eq!(app.memory_limit_bytes(), Some(2048));

        for bad in ["", "G", "1.5G", "0M", "lots"] {
            app.max_memory_restart = bad.into();
            assert_eq!(app.memory_limit_bytes(), None, "{bad}");
        }
    }

    #[test]
    fn test_check_collects_every_issue() {
        let app = ProcessDescriptor {
            name: " ".into(),
            script: String::new(),
            instances: 0,
            max_memory_restart: "huge".into(),
            args: String::new(),
            ..ProcessDescriptor::default()
        };
        let issues = app.check();
        assert_eq!(
            issues,
            vec![
                ProcessIssue::EmptyName,
                ProcessIssue::EmptyScript,
                ProcessIssue::ZeroInstances,
                ProcessIssue::BadMemoryLimit("huge".into()),
                ProcessIssue::MissingPort,
            ]
        );
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let temp = TempDir::new().unwrap();
        let file = ProcessFile::load(Some(&temp.path().join("process.toml"))).unwrap();
        assert_eq!(file, ProcessFile::default());
        assert_eq!(file.apps.len(), 1);
    }

    #[test]
    fn test_load_partial_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("process.toml");
        fs::write(
            &path,
            r#"
[[apps]]
name = "kamikaya-backend"
instances = 2
max_memory_restart = "512M"

[apps.env]
NODE_ENV = "staging"

[[apps]]
name = "kamikaya-worker"
args = "-m worker --port 8002"
"#,
        )
        .unwrap();

        let file = ProcessFile::load(Some(&path)).unwrap();
        assert_eq!(file.apps.len(), 2);
        assert_eq!(file.apps[0].instances, 2);
        assert_eq!(file.apps[0].env.len(), 1);
        assert_eq!(file.apps[0].script, "backend/venv/bin/python");
        assert_eq!(file.apps[1].port(), Some(8002));
        assert!(file.check().is_empty());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("process.toml");
        fs::write(&path, "[[apps]\nname =").unwrap();
        let err = ProcessFile::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ProcessError::ParseError(_)));
    }

    #[test]
    fn test_toml_round_trip_keeps_defaults() {
        let file = ProcessFile::default();
        let text = file.to_toml().unwrap();
        assert!(text.contains("[[apps]]"));
        let parsed: ProcessFile = toml::from_str(&text).unwrap();
        assert_eq!(parsed, file);
    }

    #[test]
    fn test_file_check_names_the_app() {
        let mut file = ProcessFile::default();
        file.apps.push(ProcessDescriptor {
            name: "broken".into(),
            instances: 0,
            ..ProcessDescriptor::default()
        });
        let problems = file.check();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].0, "broken");
        assert_eq!(problems[0].1, vec![ProcessIssue::ZeroInstances]);
    }
}
