//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["ipv6-monitor"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// CLI args with both required credentials plus `args`
fn cli_with_credentials(args: &[&str]) -> Cli {
    let mut full_args = vec!["--bot-token", "123456:ABC", "--chat-id", "42"];
    full_args.extend(args);
    cli(&full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod runtime_tests;
