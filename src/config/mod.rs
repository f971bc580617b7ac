//! Configuration layer for ipv6-monitor.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The bot token and chat ID have no default and must come from one of the
//! first two sources. The probe URL default depends on the resolved IP version.
//!
//! # Boolean Flag Semantics
//!
//! `--late-start-alert` uses OR semantics: if set `true` in either CLI or
//! TOML, the result is `true`. Flags only enable, never disable.
//!
//! # TOML-Only Options
//!
//! Alert message templates (`[messages]`) can only be set in a config file.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, IpVersionArg, LogLevelArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
