//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid IP version value.
    #[error("Invalid IP version '{value}': expected ipv4 or ipv6")]
    InvalidIpVersion {
        /// The invalid value provided
        value: String,
    },

    /// Invalid log level value.
    #[error("Invalid log level '{value}': expected trace, debug, info, warn, or error")]
    InvalidLogLevel {
        /// The invalid value provided
        value: String,
    },

    /// Invalid alert message template (Handlebars syntax error).
    #[error("Invalid message template: {reason}")]
    InvalidTemplate {
        /// Reason for invalidity
        reason: String,
    },

    /// A text value that must not be blank.
    #[error("Invalid value for {field}: must not be empty")]
    EmptyValue {
        /// Name of the field
        field: &'static str,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The Telegram bot token field.
    pub const BOT_TOKEN: &str = "bot_token";
    /// The Telegram chat id field.
    pub const CHAT_ID: &str = "chat_id";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
