//! Config command implementations.
//!
//! This module implements the `kamikaya config` subcommands for managing
//! configuration without editing JSON directly.

use crate::config::{
    metadata::{self, KeyMetadata},
    FieldError, KamikayaConfig,
};
use crate::draft::{format_rupiah, LOAN_AMOUNT_STEP, MAX_LOAN_AMOUNT, MIN_LOAN_AMOUNT};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// Unknown key or rejected value.
    #[error("{0}")]
    FieldError(#[from] FieldError),

    /// The config file could not be read or written.
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// The editor could not be launched.
    #[error("Failed to open editor: {0}")]
    EditorError(String),

    /// `$EDITOR` is unset.
    #[error("No EDITOR environment variable set")]
    NoEditor,

    /// Section name not recognised.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Lines describing a section, as printed by `config show`.
fn section_lines(config: &KamikayaConfig, section: &str) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(fields) = KamikayaConfig::fields_for_section(section) {
        for field in fields {
            let path = format!("{section}.{field}");
            let value = config.get_by_path(&path).unwrap_or_else(|_| "?".into());
            lines.push(format!("  {:<24} {}", field, value));
        }
    }
    if section == "loan" {
        lines.push(format!(
            "  {:<24} {} - {} (step {})",
            "range",
            format_rupiah(MIN_LOAN_AMOUNT as i64),
            format_rupiah(MAX_LOAN_AMOUNT as i64),
            format_rupiah(LOAN_AMOUNT_STEP as i64)
        ));
    }
    lines
}

/// Show all config values in a human-readable format.
pub fn config_show(section_filter: Option<&str>) -> ConfigCommandResult {
    let config = KamikayaConfig::load(None)?;

    let sections: Vec<&str> = if let Some(filter) = section_filter {
        if KamikayaConfig::fields_for_section(filter).is_some() {
            vec![filter]
        } else {
            return Err(ConfigCommandError::UnknownSection(filter.into()));
        }
    } else {
        KamikayaConfig::section_names().to_vec()
    };

    println!("\x1b[1m=== kamikaya config ===\x1b[0m");
    println!();

    for section in sections {
        println!("\x1b[36m{section}\x1b[0m");
        for line in section_lines(&config, section) {
            println!("{line}");
        }
        println!();
    }

    Ok(())
}

/// Get a specific config value.
pub fn config_get(key: &str) -> ConfigCommandResult {
    let config = KamikayaConfig::load(None)?;
    let value = config.get_by_path(key)?;
    println!("{value}");
    Ok(())
}

/// Set a config value.
pub fn config_set(key: &str, value: &str) -> ConfigCommandResult {
    let mut config = KamikayaConfig::load(None)?;
    let old_value = config.get_by_path(key).ok();

    config.set_by_path(key, value)?;
    config.save(None)?;

    let new_value = config.get_by_path(key)?;
    tracing::debug!(key, value = %new_value, "config updated");
    match old_value {
        Some(old) if old != new_value => println!("\x1b[32m✓\x1b[0m {key}: {old} → {new_value}"),
        Some(_) => println!("\x1b[33m⚠\x1b[0m {key} unchanged: {new_value}"),
        None => println!("\x1b[32m✓\x1b[0m {key} = {new_value}"),
    }

    Ok(())
}

/// Reset config to defaults.
pub fn config_reset(key: Option<&str>) -> ConfigCommandResult {
    let mut config = KamikayaConfig::load(None)?;

    match key {
        Some(k) => {
            // Check if it's a section or a field
            if KamikayaConfig::fields_for_section(k).is_some() {
                config.reset_section(k)?;
                println!("\x1b[32m✓\x1b[0m Reset section '{k}' to defaults");
            } else if k.contains('.') {
                config.reset_field(k)?;
                let new_value = config.get_by_path(k)?;
                println!("\x1b[32m✓\x1b[0m Reset {k} to default: {new_value}");
            } else {
                return Err(ConfigCommandError::UnknownSection(k.into()));
            }
        }
        None => {
            config = KamikayaConfig::default();
            println!("\x1b[32m✓\x1b[0m Reset all config to defaults");
        }
    }

    config.save(None)?;
    Ok(())
}

/// Open config file in editor.
pub fn config_edit() -> ConfigCommandResult {
    use std::process::Command;

    let editor = std::env::var("EDITOR").map_err(|_| ConfigCommandError::NoEditor)?;
    let config_path = KamikayaConfig::config_file();

    if !config_path.exists() {
        KamikayaConfig::default().save(None)?;
        println!(
            "\x1b[2mCreated default config at {}\x1b[0m",
            config_path.display()
        );
    }

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| ConfigCommandError::EditorError(e.to_string()))?;

    if status.success() {
        match KamikayaConfig::load(None) {
            Ok(_) => println!("\x1b[32m✓\x1b[0m Config saved and validated"),
            Err(e) => eprintln!("\x1b[31mWarning:\x1b[0m Config may be invalid: {e}"),
        }
    } else {
        eprintln!("\x1b[31mEditor exited with error\x1b[0m");
    }

    Ok(())
}

/// Show documentation for config keys.
pub fn config_explain(key: Option<&str>) -> ConfigCommandResult {
    match key {
        Some(k) => explain_key(k),
        None => explain_all(),
    }
}

fn explain_key(key: &str) -> ConfigCommandResult {
    if let Some(meta) = metadata::get_metadata(key) {
        print_key_help(meta);
        return Ok(());
    }

    if KamikayaConfig::fields_for_section(key).is_some() {
        println!("\x1b[1m{key}\x1b[0m section");
        println!();
        for meta in metadata::keys_for_section(key) {
            let field = meta
                .key
                .strip_prefix(&format!("{key}."))
                .unwrap_or(meta.key);
            println!("  \x1b[36m{field}\x1b[0m");
            println!("    {}", first_sentence(meta.description));
            println!();
        }
        return Ok(());
    }

    let matches = metadata::search_keys(key);
    if matches.is_empty() {
        eprintln!("\x1b[31mUnknown key:\x1b[0m {key}");
        eprintln!("Run \x1b[36mkamikaya config explain\x1b[0m to see all available keys.");
        return Err(ConfigCommandError::FieldError(FieldError::UnknownKey(
            key.into(),
        )));
    }

    println!("\x1b[33mDid you mean:\x1b[0m");
    for meta in matches.iter().take(5) {
        println!("  {}", meta.key);
    }
    Ok(())
}

fn first_sentence(text: &str) -> &str {
    text.split(". ").next().unwrap_or(text).trim_end_matches('.')
}

fn explain_all() -> ConfigCommandResult {
    println!("\x1b[1m=== kamikaya config keys ===\x1b[0m");
    println!();
    println!("Use \x1b[36mkamikaya config explain <key>\x1b[0m for details.");
    println!();

    for &section in KamikayaConfig::section_names() {
        println!("\x1b[1m{section}\x1b[0m");
        for meta in metadata::keys_for_section(section) {
            let field = meta
                .key
                .strip_prefix(&format!("{section}."))
                .unwrap_or(meta.key);
            println!("  \x1b[36m{field}\x1b[0m");
            println!("    {}", first_sentence(meta.description));
        }
        println!();
    }

    Ok(())
}

fn print_key_help(meta: &KeyMetadata) {
    let config = KamikayaConfig::load(None).ok();
    let current = config.as_ref().and_then(|c| c.get_by_path(meta.key).ok());

    println!("\x1b[1m{}\x1b[0m", meta.key);
    println!();
    println!("  {}", meta.description);
    println!();
    println!("  \x1b[2mType:\x1b[0m     {}", meta.value_type);
    println!("  \x1b[2mDefault:\x1b[0m  {}", meta.default);
    if let Some(curr) = current {
        if curr == meta.default {
            println!("  \x1b[2mCurrent:\x1b[0m  {curr} \x1b[2m(default)\x1b[0m");
        } else {
            println!("  \x1b[2mCurrent:\x1b[0m  \x1b[33m{curr}\x1b[0m");
        }
    }
    println!();
    println!("  \x1b[2mExamples:\x1b[0m");
    for example in meta.examples {
        println!("    kamikaya config set {} {}", meta.key, example);
    }
}

/// List all valid config keys.
pub fn config_keys() -> ConfigCommandResult {
    for key in KamikayaConfig::all_keys() {
        println!("{key}");
    }
    Ok(())
}
