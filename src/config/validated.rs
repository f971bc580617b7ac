//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use tracing::Level;
use url::Url;

use crate::alert::{AlertError, AlertTemplates, defaults as messages};
use crate::monitor::MAX_CHECK_INTERVAL;
use crate::probe::IpFamily;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
///
/// The bot token is redacted from both `Debug` and `Display` output.
pub struct ValidatedConfig {
    /// Address family to monitor
    pub family: IpFamily,

    /// Time between periodic checks
    pub check_interval: Duration,

    /// Address echo service URL
    pub probe_url: Url,

    /// Per-request HTTP timeout
    pub http_timeout: Duration,

    /// Send the "started" alert when the first address is found late
    pub late_start_alert: bool,

    /// Telegram Bot API base URL
    pub api_url: Url,

    /// Telegram bot token (required)
    pub bot_token: String,

    /// Telegram chat ID (required)
    pub chat_id: String,

    /// Alert message templates
    pub templates: AlertTemplates,

    /// Log level
    pub log_level: Level,

    /// Absolute path of the log file
    pub log_file: PathBuf,

    /// Service name registered with the Service Control Manager
    pub service_name: String,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ family: {}, check_interval: {}m, probe_url: {}, http_timeout: {}s, \
             late_start_alert: {}, api_url: {}, chat_id: {}, bot_token: <redacted>, \
             service_name: {}, log_level: {}, log_file: {} }}",
            self.family,
            self.check_interval.as_secs() / 60,
            self.probe_url,
            self.http_timeout.as_secs(),
            self.late_start_alert,
            self.api_url,
            self.chat_id,
            self.service_name,
            self.log_level,
            self.log_file.display(),
        )
    }
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("family", &self.family)
            .field("check_interval", &self.check_interval)
            .field("probe_url", &self.probe_url.as_str())
            .field("http_timeout", &self.http_timeout)
            .field("late_start_alert", &self.late_start_alert)
            .field("api_url", &self.api_url.as_str())
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("templates", &self.templates)
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .field("service_name", &self.service_name)
            .finish()
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`bot_token`, `chat_id`)
    /// - A URL is invalid or not http/https
    /// - Duration values are zero or too large
    /// - The IP version or log level is not recognised
    /// - A message template has a syntax error
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let family = Self::resolve_family(cli, toml)?;

        let bot_token = Self::resolve_bot_token(cli, toml)?;
        let chat_id = Self::resolve_chat_id(cli, toml)?;

        let api_url_str = cli
            .api_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.telegram.api_url.as_deref()))
            .unwrap_or(defaults::API_URL);
        let api_url = parse_http_url(api_url_str)?;

        // Default endpoint follows the family
        let probe_url_str = cli
            .probe_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.monitor.probe_url.as_deref()))
            .unwrap_or_else(|| family.default_probe_url());
        let probe_url = parse_http_url(probe_url_str)?;

        let check_interval = Self::resolve_check_interval(cli, toml)?;
        let http_timeout = Self::resolve_http_timeout(cli, toml)?;

        // Flags only enable, never disable
        let late_start_alert =
            cli.late_start_alert || toml.is_some_and(|t| t.monitor.late_start_alert);

        let templates = Self::resolve_templates(toml)?;
        let log_level = Self::resolve_log_level(cli, toml)?;
        let log_file = Self::resolve_log_file(cli, toml);
        let service_name = Self::resolve_service_name(cli, toml)?;

        Ok(Self {
            family,
            check_interval,
            probe_url,
            http_timeout,
            late_start_alert,
            api_url,
            bot_token,
            chat_id,
            templates,
            log_level,
            log_file,
            service_name,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_family(cli: &Cli, toml: Option<&TomlConfig>) -> Result<IpFamily, ConfigError> {
        // CLI takes precedence
        if let Some(version) = cli.ip_version {
            return Ok(version.into());
        }

        match toml.and_then(|t| t.monitor.ip_version.as_deref()) {
            Some(version) => parse_ip_version(version),
            None => Ok(IpFamily::default()),
        }
    }

    fn resolve_bot_token(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        non_blank(
            cli.bot_token
                .as_deref()
                .or_else(|| toml.and_then(|t| t.telegram.bot_token.as_deref())),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::BOT_TOKEN,
                "Use --bot-token or set telegram.bot_token in config file",
            )
        })
    }

    fn resolve_chat_id(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        non_blank(
            cli.chat_id
                .as_deref()
                .or_else(|| toml.and_then(|t| t.telegram.chat_id.as_deref())),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::CHAT_ID,
                "Use --chat-id or set telegram.chat_id in config file",
            )
        })
    }

    fn resolve_check_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let minutes = cli
            .check_interval
            .or_else(|| toml.and_then(|t| t.monitor.check_interval))
            .unwrap_or(defaults::CHECK_INTERVAL_MINS);

        if minutes == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "check_interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        let max_minutes = MAX_CHECK_INTERVAL.as_secs() / 60;
        if minutes > max_minutes {
            return Err(ConfigError::InvalidDuration {
                field: "check_interval",
                reason: format!("{minutes} minutes exceeds the maximum of {max_minutes}"),
            });
        }

        Ok(Duration::from_secs(minutes * 60))
    }

    fn resolve_http_timeout(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        let seconds = cli
            .http_timeout
            .or_else(|| toml.and_then(|t| t.monitor.http_timeout))
            .unwrap_or(defaults::HTTP_TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "http_timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_templates(toml: Option<&TomlConfig>) -> Result<AlertTemplates, ConfigError> {
        let section = toml.map(|t| &t.messages);

        let started = section
            .and_then(|m| m.started.as_deref())
            .unwrap_or(messages::STARTED);
        let changed = section
            .and_then(|m| m.changed.as_deref())
            .unwrap_or(messages::CHANGED);
        let stopped = section
            .and_then(|m| m.stopped.as_deref())
            .unwrap_or(messages::STOPPED);

        AlertTemplates::new(started, changed, stopped).map_err(|e| match e {
            AlertError::Render(reason) => ConfigError::InvalidTemplate { reason },
            other => ConfigError::InvalidTemplate {
                reason: other.to_string(),
            },
        })
    }

    fn resolve_log_level(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Level, ConfigError> {
        if let Some(level) = cli.log_level {
            return Ok(level.into());
        }

        match toml.and_then(|t| t.log.level.as_deref()) {
            Some(level) => level.parse().map_err(|_| ConfigError::InvalidLogLevel {
                value: level.to_string(),
            }),
            None => Ok(defaults::LOG_LEVEL),
        }
    }

    fn resolve_log_file(cli: &Cli, toml: Option<&TomlConfig>) -> PathBuf {
        let path = cli
            .log_file
            .clone()
            .or_else(|| toml.and_then(|t| t.log.file.as_deref().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from(defaults::LOG_FILE));

        absolutize(&expand_tilde(&path))
    }

    fn resolve_service_name(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        match cli
            .service_name
            .as_deref()
            .or_else(|| toml.and_then(|t| t.service.name.as_deref()))
        {
            Some(name) => non_blank(Some(name)).ok_or(ConfigError::EmptyValue {
                field: "service_name",
            }),
            None => Ok(defaults::SERVICE_NAME.to_string()),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_ip_version(s: &str) -> Result<IpFamily, ConfigError> {
    match s.to_lowercase().as_str() {
        "ipv4" | "v4" | "4" => Ok(IpFamily::V4),
        "ipv6" | "v6" | "6" => Ok(IpFamily::V6),
        _ => Err(ConfigError::InvalidIpVersion {
            value: s.to_string(),
        }),
    }
}

fn parse_http_url(s: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(s).map_err(|e| ConfigError::InvalidUrl {
        url: s.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            url: s.to_string(),
            reason: format!("scheme must be http or https, got {other}"),
        }),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Replaces a leading `~` component with the home directory, when known.
fn expand_tilde(path: &Path) -> PathBuf {
    let mut components = path.components();

    match components.next() {
        Some(Component::Normal(first)) if first.to_str() == Some("~") => {
            let rest = components.as_path();
            match dirs::home_dir() {
                Some(home) if rest.as_os_str().is_empty() => home,
                Some(home) => home.join(rest),
                None => path.to_path_buf(),
            }
        }
        _ => path.to_path_buf(),
    }
}

/// Resolves a relative path against the working directory.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
}
