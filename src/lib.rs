//! kamikaya - KamiKaya loan application intake wizard.
//!
//! The wizard core ([`wizard`], [`draft`]) is a pure state machine over an
//! in-memory application draft. The terminal front-end ([`tui`]), the CLI
//! ([`cli`]) and the backend process descriptor ([`process`]) sit around it.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod draft;
pub mod logging;
pub mod process;
pub mod tui;
pub mod wizard;

pub use draft::{format_rupiah, ApplicationDraft, Field, FileSlot, LoanAmount};
pub use wizard::{Action, Outcome, Step, WizardPolicy, WizardState};
