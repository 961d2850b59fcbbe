//! kamikaya - KamiKaya loan application intake wizard.
//!
//! This is the main entry point for the kamikaya CLI tool.

use std::io::IsTerminal;

use clap::{CommandFactory, Parser};
use kamikaya::cli::{start_logging, ApplyCommand, Cli, Commands, ConfigCommands, ProcessCommands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None if std::io::stdout().is_terminal() => ApplyCommand::default().execute(),
        None => {
            // Not a terminal - nothing to draw on, so show help instead
            let _ = Cli::command().print_help();
        }
        Some(Commands::Apply(c)) => c.execute(),
        Some(cmd) => {
            start_logging();
            run(cmd);
        }
    }
}

fn run(cmd: Commands) {
    match cmd {
        Commands::Apply(c) => c.execute(),
        Commands::Replay(c) => c.execute(),
        Commands::Config(subcmd) => match subcmd {
            ConfigCommands::Show(c) => c.execute(),
            ConfigCommands::Get(c) => c.execute(),
            ConfigCommands::Set(c) => c.execute(),
            ConfigCommands::Reset(c) => c.execute(),
            ConfigCommands::Edit(c) => c.execute(),
            ConfigCommands::Explain(c) => c.execute(),
            ConfigCommands::Keys(c) => c.execute(),
        },
        Commands::Process(subcmd) => match subcmd {
            ProcessCommands::Show(c) => c.execute(),
            ProcessCommands::Check(c) => c.execute(),
            ProcessCommands::Render(c) => c.execute(),
        },
        Commands::Completions(c) => c.execute(),
    }
}
