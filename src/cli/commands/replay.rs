//! Replay command implementation.
//!
//! Runs a scripted action list through a fresh wizard without a terminal.

use std::fs;
use std::io::{self, Read};

use serde::Serialize;

use crate::config::KamikayaConfig;
use crate::wizard::{Acknowledgment, Action, Outcome, WizardPolicy, WizardState};

/// Error type for replay operations.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The action list could not be read.
    #[error("Failed to read actions: {0}")]
    ReadError(#[from] std::io::Error),

    /// The action list is not a JSON array of actions.
    #[error("Failed to parse actions: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The config file could not be loaded.
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

/// What `replay` prints.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    /// Wizard state after the last action.
    pub state: WizardState,
    /// Acknowledgments issued along the way.
    pub acknowledgments: Vec<Acknowledgment>,
    /// Outcome of each action, in order.
    pub outcomes: Vec<Outcome>,
}

/// Parse an action list.
pub fn parse_actions(text: &str) -> Result<Vec<Action>, ReplayError> {
    Ok(serde_json::from_str(text)?)
}

/// Apply `actions` to a fresh wizard under `policy`.
pub fn run_actions(actions: &[Action], policy: &WizardPolicy) -> ReplayReport {
    let (state, outcomes) = WizardState::new(policy).apply_all(actions, policy);
    let acknowledgments = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            Outcome::Submitted(ack) => Some(ack.clone()),
            _ => None,
        })
        .collect();
    ReplayReport {
        state,
        acknowledgments,
        outcomes,
    }
}

fn read_input(input: &str) -> Result<String, ReplayError> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

/// Execute the replay command.
pub fn replay(input: &str, compact: bool) -> Result<(), ReplayError> {
    let config = KamikayaConfig::load(None)?;
    let actions = parse_actions(&read_input(input)?)?;
    tracing::debug!(count = actions.len(), "replaying actions");

    let report = run_actions(&actions, &config.wizard_policy());
    let json = if compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");
    Ok(())
}
