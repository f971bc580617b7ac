//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::probe::IpFamily;

/// IPv6 Monitor: address change alerts over Telegram
///
/// Watches the host's global IP address and sends a Telegram message when it
/// changes. Runs as a Windows service when started by the Service Control
/// Manager, otherwise in the foreground until Ctrl+C.
#[derive(Debug, Parser)]
#[command(name = "ipv6-monitor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Telegram bot token (required for run mode)
    #[arg(long = "bot-token")]
    pub bot_token: Option<String>,

    /// Telegram chat ID (required for run mode)
    #[arg(long = "chat-id")]
    pub chat_id: Option<String>,

    /// Telegram Bot API base URL
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// Address check interval in minutes (at most one week)
    #[arg(long = "check-interval", value_name = "MINUTES")]
    pub check_interval: Option<u64>,

    /// IP version to monitor
    #[arg(long = "ip-version", value_enum)]
    pub ip_version: Option<IpVersionArg>,

    /// Address echo service URL (default depends on --ip-version)
    #[arg(long = "probe-url")]
    pub probe_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long = "http-timeout", value_name = "SECONDS")]
    pub http_timeout: Option<u64>,

    /// Send the "started" alert when the first address is only found after a
    /// failed startup check
    #[arg(long = "late-start-alert")]
    pub late_start_alert: bool,

    /// Service name registered with the Service Control Manager
    #[arg(long = "service-name")]
    pub service_name: Option<String>,

    /// Logging level
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log file path (relative to working directory or absolute)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// Subcommands for ipv6-monitor
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ipv6-monitor.toml")]
        output: PathBuf,
    },
}

/// IP version argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IpVersionArg {
    /// Monitor the IPv4 address
    #[value(name = "ipv4")]
    V4,
    /// Monitor the IPv6 address
    #[value(name = "ipv6")]
    V6,
}

impl From<IpVersionArg> for IpFamily {
    fn from(arg: IpVersionArg) -> Self {
        match arg {
            IpVersionArg::V4 => Self::V4,
            IpVersionArg::V6 => Self::V6,
        }
    }
}

/// Log level argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    /// Everything, including per-request detail
    Trace,
    /// Every check result
    Debug,
    /// Startup, changes and shutdown
    Info,
    /// Recoverable problems
    Warn,
    /// Failed checks and alerts only
    Error,
}

impl From<LogLevelArg> for tracing::Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Trace => Self::TRACE,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Error => Self::ERROR,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
