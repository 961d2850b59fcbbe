//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions and command implementations.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// KamiKaya loan application intake wizard.
///
/// Walks an applicant through the four-step loan application in the
/// terminal. Running without a subcommand starts the wizard.
#[derive(Parser, Debug)]
#[command(name = "kamikaya")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for kamikaya.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill in a loan application in the terminal.
    ///
    /// Keys: tab/shift-tab move focus, pgdn/pgup change step, [ and ] move
    /// the loan slider, ctrl-s submits on the last step, ctrl-q quits.
    Apply(ApplyCommand),

    /// Apply a scripted list of wizard actions and print the result.
    ///
    /// Reads a JSON array of actions from FILE (or stdin with `-`), runs
    /// them against a fresh wizard, and prints the final state as JSON.
    ///
    /// Example action list:
    ///   [{"action": "advance"},
    ///    {"action": "set_field", "field": "full_name", "value": "Budi"},
    ///    {"action": "submit"}]
    Replay(ReplayCommand),

    /// Manage kamikaya configuration.
    ///
    /// View, set, and understand config parameters without editing JSON directly.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Inspect and render the backend process descriptor.
    #[command(subcommand)]
    Process(ProcessCommands),

    /// Generate shell completions.
    ///
    /// Outputs completion script to stdout for bash, zsh, or fish.
    Completions(CompletionsCommand),
}

/// Arguments for the 'apply' command.
#[derive(Args, Debug, Default)]
pub struct ApplyCommand {
    /// Skip the service introduction on the first step.
    #[arg(long)]
    pub no_intro: bool,
}

/// Arguments for the 'replay' command.
#[derive(Args, Debug)]
pub struct ReplayCommand {
    /// JSON file with the action list, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub input: String,

    /// Print compact JSON on one line.
    #[arg(long)]
    pub compact: bool,
}

/// Subcommands for config management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all configuration values.
    ///
    /// Displays all config sections and their current values.
    Show(ConfigShowCommand),

    /// Get a specific config value.
    ///
    /// Use dot notation for nested keys (e.g., submission.require_terms).
    Get(ConfigGetCommand),

    /// Set a config value.
    ///
    /// Use dot notation for keys. Values are validated before saving.
    Set(ConfigSetCommand),

    /// Reset config to defaults.
    ///
    /// Can reset a specific key, a section, or all config.
    Reset(ConfigResetCommand),

    /// Open config file in your editor.
    ///
    /// Uses $EDITOR environment variable.
    Edit(ConfigEditCommand),

    /// Show documentation for config keys.
    ///
    /// Displays description, type, default value, and examples.
    Explain(ConfigExplainCommand),

    /// List all valid config keys.
    Keys(ConfigKeysCommand),
}

/// Arguments for 'config show' command.
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Filter to a specific section (e.g., 'loan', 'submission').
    pub section: Option<String>,
}

/// Arguments for 'config get' command.
#[derive(Args, Debug)]
pub struct ConfigGetCommand {
    /// Config key in dot notation (e.g., tui.tick_rate_ms).
    pub key: String,
}

/// Arguments for 'config set' command.
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Config key in dot notation (e.g., tui.tick_rate_ms).
    pub key: String,

    /// Value to set.
    pub value: String,
}

/// Arguments for 'config reset' command.
#[derive(Args, Debug)]
pub struct ConfigResetCommand {
    /// Key or section to reset. If omitted, resets all config.
    pub key: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for 'config edit' command.
#[derive(Args, Debug)]
pub struct ConfigEditCommand {}

/// Arguments for 'config explain' command.
#[derive(Args, Debug)]
pub struct ConfigExplainCommand {
    /// Config key to explain. If omitted, lists all keys with brief descriptions.
    pub key: Option<String>,
}

/// Arguments for 'config keys' command.
#[derive(Args, Debug)]
pub struct ConfigKeysCommand {}

/// Subcommands for the process descriptor.
#[derive(Subcommand, Debug)]
pub enum ProcessCommands {
    /// Show the descriptor with parsed port and memory threshold.
    Show(ProcessShowCommand),

    /// Report problems that would stop the backend from starting.
    Check(ProcessCheckCommand),

    /// Render ecosystem.config.js for the process manager.
    Render(ProcessRenderCommand),
}

/// Descriptor location shared by the process subcommands.
#[derive(Args, Debug)]
pub struct ProcessFileArg {
    /// Descriptor file. Defaults to deploy/process.toml.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Arguments for 'process show' command.
#[derive(Args, Debug)]
pub struct ProcessShowCommand {
    /// Descriptor location.
    #[command(flatten)]
    pub source: ProcessFileArg,
}

/// Arguments for 'process check' command.
#[derive(Args, Debug)]
pub struct ProcessCheckCommand {
    /// Descriptor location.
    #[command(flatten)]
    pub source: ProcessFileArg,
}

/// Arguments for 'process render' command.
#[derive(Args, Debug)]
pub struct ProcessRenderCommand {
    /// Descriptor location.
    #[command(flatten)]
    pub source: ProcessFileArg,

    /// Write to this file instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the 'completions' command.
#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for.
    #[arg(value_parser = ["bash", "zsh", "fish"])]
    pub shell: String,
}

// ============================================================================
// Command implementations
// ============================================================================

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("\x1b[31mError:\x1b[0m {e}");
    std::process::exit(1);
}

/// Send log events from the non-interactive commands to stderr.
///
/// Falls back to the default level when the config file can't be read; the
/// command itself reports that error.
pub fn start_logging() {
    let config = crate::config::KamikayaConfig::load(None).unwrap_or_default();
    if let Err(e) = crate::logging::init_stderr(&config.logging) {
        eprintln!("\x1b[33mWarning:\x1b[0m {e}");
    }
}

impl ApplyCommand {
    /// Execute the apply command - runs the wizard.
    pub fn execute(&self) {
        if let Err(e) = commands::apply::apply(self.no_intro) {
            fail(format!("{e:#}"));
        }
    }
}

impl ReplayCommand {
    /// Execute the replay command.
    pub fn execute(&self) {
        if let Err(e) = commands::replay::replay(&self.input, self.compact) {
            fail(e);
        }
    }
}

impl ConfigShowCommand {
    /// Execute the config show command.
    pub fn execute(&self) {
        if let Err(e) = commands::config::config_show(self.section.as_deref()) {
            fail(e);
        }
    }
}

impl ConfigGetCommand {
    /// Execute the config get command.
    pub fn execute(&self) {
        if let Err(e) = commands::config::config_get(&self.key) {
            fail(e);
        }
    }
}

impl ConfigSetCommand {
    /// Execute the config set command.
    pub fn execute(&self) {
        if let Err(e) = commands::config::config_set(&self.key, &self.value) {
            fail(e);
        }
    }
}

impl ConfigResetCommand {
    /// Execute the config reset command.
    pub fn execute(&self) {
        use std::io::{self, Write};

        // Confirm unless --yes (for resetting all)
        if self.key.is_none() && !self.yes {
            print!("Reset all config to defaults? [Y/n]: ");
            let _ = io::stdout().flush();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_ok() {
                let input = input.trim().to_lowercase();
                if input == "n" || input == "no" {
                    println!("Cancelled.");
                    return;
                }
            }
        }

        if let Err(e) = commands::config::config_reset(self.key.as_deref()) {
            fail(e);
        }
    }
}

impl ConfigEditCommand {
    /// Execute the config edit command.
    pub fn execute(&self) {
        if let Err(e) = commands::config::config_edit() {
            fail(e);
        }
    }
}

impl ConfigExplainCommand {
    /// Execute the config explain command.
    pub fn execute(&self) {
        if let Err(e) = commands::config::config_explain(self.key.as_deref()) {
            fail(e);
        }
    }
}

impl ConfigKeysCommand {
    /// Execute the config keys command.
    pub fn execute(&self) {
        if let Err(e) = commands::config::config_keys() {
            fail(e);
        }
    }
}

impl ProcessShowCommand {
    /// Execute the process show command.
    pub fn execute(&self) {
        if let Err(e) = commands::process::process_show(self.source.file.as_deref()) {
            fail(e);
        }
    }
}

impl ProcessCheckCommand {
    /// Execute the process check command.
    pub fn execute(&self) {
        if let Err(e) = commands::process::process_check(self.source.file.as_deref()) {
            fail(e);
        }
    }
}

impl ProcessRenderCommand {
    /// Execute the process render command.
    pub fn execute(&self) {
        if let Err(e) = commands::process::process_render(
            self.source.file.as_deref(),
            self.output.as_deref(),
        ) {
            fail(e);
        }
    }
}

impl CompletionsCommand {
    /// Execute the completions command - generates shell completions.
    pub fn execute(&self) {
        if let Err(e) = commands::completions::completions(&self.shell) {
            fail(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["kamikaya", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_help_flag() {
        let result = Cli::try_parse_from(["kamikaya", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["kamikaya"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_apply_command() {
        let cli = Cli::try_parse_from(["kamikaya", "apply", "--no-intro"]).unwrap();
        match cli.command {
            Some(Commands::Apply(cmd)) => assert!(cmd.no_intro),
            _ => panic!("Expected Apply command"),
        }
    }

    #[test]
    fn test_replay_command() {
        let cli = Cli::try_parse_from(["kamikaya", "replay", "-", "--compact"]).unwrap();
        match cli.command {
            Some(Commands::Replay(cmd)) => {
                assert_eq!(cmd.input, "-");
                assert!(cmd.compact);
            }
            _ => panic!("Expected Replay command"),
        }
    }

    #[test]
    fn test_replay_requires_input() {
        assert!(Cli::try_parse_from(["kamikaya", "replay"]).is_err());
    }

    #[test]
    fn test_config_set_command() {
        let cli =
            Cli::try_parse_from(["kamikaya", "config", "set", "tui.tick_rate_ms", "50"]).unwrap();
        match cli.command {
            Some(Commands::Config(ConfigCommands::Set(cmd))) => {
                assert_eq!(cmd.key, "tui.tick_rate_ms");
                assert_eq!(cmd.value, "50");
            }
            _ => panic!("Expected Config Set command"),
        }
    }

    #[test]
    fn test_config_show_with_section() {
        let cli = Cli::try_parse_from(["kamikaya", "config", "show", "loan"]).unwrap();
        match cli.command {
            Some(Commands::Config(ConfigCommands::Show(cmd))) => {
                assert_eq!(cmd.section.as_deref(), Some("loan"));
            }
            _ => panic!("Expected Config Show command"),
        }
    }

    #[test]
    fn test_process_render_command() {
        let cli = Cli::try_parse_from([
            "kamikaya",
            "process",
            "render",
            "-f",
            "deploy/staging.toml",
            "-o",
            "ecosystem.config.js",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Process(ProcessCommands::Render(cmd))) => {
                assert_eq!(
                    cmd.source.file,
                    Some(PathBuf::from("deploy/staging.toml"))
                );
                assert_eq!(cmd.output, Some(PathBuf::from("ecosystem.config.js")));
            }
            _ => panic!("Expected Process Render command"),
        }
    }

    #[test]
    fn test_completions_rejects_unknown_shell() {
        assert!(Cli::try_parse_from(["kamikaya", "completions", "powershell"]).is_err());
    }
}
