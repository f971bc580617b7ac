//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Telegram configuration section
    #[serde(default)]
    pub telegram: TelegramSection,

    /// Monitoring configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Alert message templates
    #[serde(default)]
    pub messages: MessagesSection,

    /// Logging configuration
    #[serde(default)]
    pub log: LogSection,

    /// Service host configuration
    #[serde(default)]
    pub service: ServiceSection,
}

/// Telegram configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramSection {
    /// Bot token
    pub bot_token: Option<String>,

    /// Chat ID the alerts go to
    pub chat_id: Option<String>,

    /// Bot API base URL
    pub api_url: Option<String>,
}

/// Monitoring configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Check interval in minutes
    pub check_interval: Option<u64>,

    /// IP version to monitor: "ipv4" or "ipv6"
    pub ip_version: Option<String>,

    /// Address echo service URL
    pub probe_url: Option<String>,

    /// HTTP request timeout in seconds
    pub http_timeout: Option<u64>,

    /// Send the "started" alert after a failed startup check
    #[serde(default)]
    pub late_start_alert: bool,
}

/// Alert message templates section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessagesSection {
    /// Sent once the first address is known
    pub started: Option<String>,

    /// Sent when the address changes
    pub changed: Option<String>,

    /// Sent when monitoring stops
    pub stopped: Option<String>,
}

/// Logging configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Log level
    pub level: Option<String>,

    /// Log file path
    pub file: Option<String>,
}

/// Service host configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    /// Name registered with the Service Control Manager
    pub name: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# IPv6 Monitor Configuration File

[telegram]
# Bot token from @BotFather (required)
# bot_token = "123456:ABC-DEF"

# Chat that receives the alerts (required)
# chat_id = "123456789"

# Bot API base URL (default: https://api.telegram.org)
# api_url = "https://api.telegram.org"

[monitor]
# Check interval in minutes, at most 10080 (one week) (default: 5)
check_interval = 5

# IP version to monitor: "ipv4" or "ipv6" (default: ipv6)
# ip_version = "ipv6"

# Address echo service; must answer a GET with the caller's address as plain text
# Default: https://ipv6.icanhazip.com (ipv6) or https://ipv4.icanhazip.com (ipv4)
# probe_url = "https://ipv6.icanhazip.com"

# HTTP request timeout in seconds (default: 30)
# http_timeout = 30

# Send the "started" alert when the first address is only found after the
# startup check failed (default: false)
# late_start_alert = false

[messages]
# Handlebars templates, sent with Telegram's HTML parse mode.
# Variables: {{family}} in all, {{address}} in started, {{previous}} and {{current}} in changed
# started = "🚀 Service started\nCurrent {{family}}: <code>{{address}}</code>"
# changed = "📢 {{family}} address changed\nOld: <code>{{previous}}</code>\nNew: <code>{{current}}</code>"
# stopped = "🛑 Service stopped"

[log]
# Log level: trace, debug, info, warn, error (default: info)
# level = "info"

# Log file, relative to the working directory or absolute (default: ipv6-monitor.log)
# file = "ipv6-monitor.log"

[service]
# Service name registered with the Service Control Manager (default: IPv6MonitorService)
# name = "IPv6MonitorService"
"#
    .to_string()
}
