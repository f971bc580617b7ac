//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default check interval in minutes.
pub const CHECK_INTERVAL_MINS: u64 = 5;

/// Default HTTP request timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default Telegram Bot API base URL.
pub const API_URL: &str = "https://api.telegram.org";

/// Default name under which the service is registered with the SCM.
pub const SERVICE_NAME: &str = "IPv6MonitorService";

/// Default log file, relative to the working directory.
pub const LOG_FILE: &str = "ipv6-monitor.log";

/// Default log level.
pub const LOG_LEVEL: tracing::Level = tracing::Level::INFO;

/// Default check interval as Duration.
#[must_use]
pub const fn check_interval() -> Duration {
    Duration::from_secs(CHECK_INTERVAL_MINS * 60)
}

/// Default HTTP request timeout as Duration.
#[must_use]
pub const fn http_timeout() -> Duration {
    Duration::from_secs(HTTP_TIMEOUT_SECS)
}
