//! Config key metadata for documentation and help.
//!
//! Descriptions, types, defaults and examples for every config key, used by
//! `kamikaya config explain` and `kamikaya config keys`.

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct KeyMetadata {
    /// The full dot-notation key (e.g., "tui.tick_rate_ms").
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Type description (e.g., "u64", "bool", "string").
    pub value_type: &'static str,
    /// Default value as string.
    pub default: &'static str,
    /// Example values.
    pub examples: &'static [&'static str],
}

/// All config key metadata.
pub static METADATA: &[KeyMetadata] = &[
    // loan section
    KeyMetadata {
        key: "loan.default_amount",
        description: "Amount the loan slider starts at for a new draft. Must sit on the \
                      slider grid: a multiple of 1.000.000 between 1.000.000 and 50.000.000.",
        value_type: "rupiah amount",
        default: "20000000",
        examples: &["5000000", "20.000.000", "50000000"],
    },
    // submission section
    KeyMetadata {
        key: "submission.require_terms",
        description: "Refuse submission while the terms and conditions box is unticked. \
                      Off by default: the box is shown but does not gate submission.",
        value_type: "bool",
        default: "false",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "submission.clear_draft",
        description: "Clear every entered field on submission. When off, submission only \
                      returns the wizard to step 1 and the draft is kept.",
        value_type: "bool",
        default: "false",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "submission.acknowledgment",
        description: "Message shown after a successful submission.",
        value_type: "string",
        default: "Pengajuan pinjaman berhasil disubmit! Tim kami akan menghubungi Anda dalam 1x24 jam.",
        examples: &["\"Terima kasih, pengajuan diterima.\""],
    },
    // tui section
    KeyMetadata {
        key: "tui.tick_rate_ms",
        description: "Redraw interval of the terminal UI in milliseconds.",
        value_type: "positive integer",
        default: "100",
        examples: &["50", "100", "250"],
    },
    KeyMetadata {
        key: "tui.show_intro",
        description: "Show the service introduction text on step 1. When off, step 1 only \
                      shows the start button.",
        value_type: "bool",
        default: "true",
        examples: &["true", "false"],
    },
    // logging section
    KeyMetadata {
        key: "logging.level",
        description: "Log filter directive. The KAMIKAYA_LOG environment variable takes \
                      precedence when set.",
        value_type: "filter directive",
        default: "info",
        examples: &["info", "debug", "kamikaya=trace"],
    },
    KeyMetadata {
        key: "logging.file",
        description: "File the log is appended to. The terminal UI owns stdout, so logs \
                      always go to a file.",
        value_type: "file path",
        default: ".kamikaya/kamikaya.log",
        examples: &["/var/log/kamikaya.log", "kamikaya.log"],
    },
];

/// Get metadata for a specific key.
pub fn get_metadata(key: &str) -> Option<&'static KeyMetadata> {
    METADATA.iter().find(|m| m.key == key)
}

/// Search for keys matching a query (prefix or contains).
pub fn search_keys(query: &str) -> Vec<&'static KeyMetadata> {
    let query_lower = query.to_lowercase();
    METADATA
        .iter()
        .filter(|m| {
            m.key.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Get all keys for a specific section.
pub fn keys_for_section(section: &str) -> Vec<&'static KeyMetadata> {
    let prefix = format!("{section}.");
    METADATA
        .iter()
        .filter(|m| m.key.starts_with(&prefix))
        .collect()
}
