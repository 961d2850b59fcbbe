//! Process command implementations.
//!
//! `kamikaya process show|check|render` over the backend descriptor.

use std::fs;
use std::path::Path;

use crate::draft::format_thousands;
use crate::process::{ProcessDescriptor, ProcessError, ProcessFile};

/// Result type for process command operations.
pub type ProcessCommandResult = Result<(), ProcessCommandError>;

/// Error type for process command operations.
#[derive(Debug, thiserror::Error)]
pub enum ProcessCommandError {
    /// Loading or rendering failed.
    #[error("{0}")]
    Process(#[from] ProcessError),

    /// The rendered file could not be written.
    #[error("Failed to write output: {0}")]
    WriteError(#[from] std::io::Error),

    /// `check` found problems.
    #[error("{0} problem(s) found in process descriptor")]
    CheckFailed(usize),
}

fn describe(app: &ProcessDescriptor) -> Vec<String> {
    let port = app
        .port()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".into());
    let memory = app
        .memory_limit_bytes()
        .map(|b| format!("{} bytes", format_thousands(b)))
        .unwrap_or_else(|| "-".into());
    let env = app
        .env
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        format!("  {:<20} {} {}", "command", app.script, app.args),
        format!("  {:<20} {}", "cwd", app.cwd),
        format!("  {:<20} {}", "port", port),
        format!("  {:<20} {}", "instances", app.instances),
        format!("  {:<20} {}", "autorestart", app.autorestart),
        format!("  {:<20} {}", "watch", app.watch),
        format!(
            "  {:<20} {} ({})",
            "max_memory_restart", app.max_memory_restart, memory
        ),
        format!("  {:<20} {}", "env", env),
        format!(
            "  {:<20} {} / {} / {}",
            "logs", app.out_file, app.error_file, app.log_file
        ),
        format!("  {:<20} {}", "time", app.time),
    ]
}

/// Print each app with its parsed port and memory threshold.
pub fn process_show(file: Option<&Path>) -> ProcessCommandResult {
    let processes = ProcessFile::load(file)?;
    for app in &processes.apps {
        println!("\x1b[36m{}\x1b[0m", app.name);
        for line in describe(app) {
            println!("{line}");
        }
        println!();
    }
    Ok(())
}

/// Report problems; fails when any app has one.
pub fn process_check(file: Option<&Path>) -> ProcessCommandResult {
    let processes = ProcessFile::load(file)?;
    let problems = processes.check();

    if problems.is_empty() {
        println!(
            "\x1b[32m✓\x1b[0m {} app(s) ready to deploy",
            processes.apps.len()
        );
        return Ok(());
    }

    let mut count = 0;
    for (name, issues) in &problems {
        println!("\x1b[31m✗\x1b[0m {name}");
        for issue in issues {
            println!("    {issue}");
            count += 1;
        }
    }
    Err(ProcessCommandError::CheckFailed(count))
}

/// Render ecosystem.config.js to `output` or stdout.
pub fn process_render(file: Option<&Path>, output: Option<&Path>) -> ProcessCommandResult {
    let processes = ProcessFile::load(file)?;
    let rendered = processes.render_ecosystem()?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)?;
            tracing::debug!(path = %path.display(), "ecosystem file written");
            println!("\x1b[32m✓\x1b[0m Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
