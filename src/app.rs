//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ipv6_monitor::config::{ConfigError, field};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing credentials, logger setup, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - runtime creation, service dispatcher failure, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Error type for logger setup failures.
#[derive(Debug, Error)]
pub enum LogSetupError {
    /// The log file's directory could not be created.
    #[error("Failed to create log directory '{}': {source}", path.display())]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The log file could not be opened for appending.
    #[error("Failed to open log file '{}': {source}", path.display())]
    OpenFile {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber was already installed.
    #[error("Failed to install logger: {0}")]
    Install(#[from] TryInitError),
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } => {
            if *f == field::BOT_TOKEN || *f == field::CHAT_ID {
                eprintln!(
                    "\nBoth --bot-token and --chat-id are required. \
                     Run 'ipv6-monitor init' to generate a configuration template."
                );
            }
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'ipv6-monitor init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Human-readable lines go to stdout; JSON lines are appended to `log_file`.
/// `RUST_LOG` overrides `level` when set.
///
/// # Errors
///
/// Returns [`LogSetupError`] if the log file cannot be opened or a
/// subscriber is already installed.
pub fn setup_tracing(level: Level, log_file: &Path) -> Result<(), LogSetupError> {
    let file = open_log_file(log_file)?;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().json().with_writer(Mutex::new(file)))
        .try_init()?;

    Ok(())
}

/// Opens `path` for appending, creating it and its directory if needed.
fn open_log_file(path: &Path) -> Result<File, LogSetupError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| LogSetupError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogSetupError::OpenFile {
            path: path.to_path_buf(),
            source: e,
        })
}
