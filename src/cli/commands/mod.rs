//! Command implementations for the kamikaya CLI.
//!
//! This module contains the actual implementations of CLI commands,
//! separated from the argument parsing definitions in cli/mod.rs.

pub mod apply;
pub mod completions;
pub mod config;
pub mod process;
pub mod replay;
