//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command, IpVersionArg, LogLevelArg};
use crate::probe::IpFamily;

mod parsing {
    use super::*;

    #[test]
    fn parse_credentials() {
        let cli = Cli::parse_from_iter([
            "ipv6-monitor",
            "--bot-token",
            "123456:ABC",
            "--chat-id",
            "-100200300",
        ]);

        assert_eq!(cli.bot_token.as_deref(), Some("123456:ABC"));
        assert_eq!(cli.chat_id.as_deref(), Some("-100200300"));
    }

    #[test]
    fn parse_monitor_options() {
        let cli = Cli::parse_from_iter([
            "ipv6-monitor",
            "--check-interval",
            "10",
            "--ip-version",
            "ipv4",
            "--probe-url",
            "https://api.ipify.org",
            "--http-timeout",
            "15",
            "--late-start-alert",
        ]);

        assert_eq!(cli.check_interval, Some(10));
        assert_eq!(cli.ip_version, Some(IpVersionArg::V4));
        assert_eq!(cli.probe_url.as_deref(), Some("https://api.ipify.org"));
        assert_eq!(cli.http_timeout, Some(15));
        assert!(cli.late_start_alert);
    }

    #[test]
    fn parse_log_options() {
        let cli = Cli::parse_from_iter([
            "ipv6-monitor",
            "--log-level",
            "debug",
            "--log-file",
            "logs/monitor.log",
        ]);

        assert_eq!(cli.log_level, Some(LogLevelArg::Debug));
        assert_eq!(cli.log_file, Some(PathBuf::from("logs/monitor.log")));
    }

    #[test]
    fn parse_service_and_config() {
        let cli = Cli::parse_from_iter([
            "ipv6-monitor",
            "--service-name",
            "MyMonitor",
            "-c",
            "monitor.toml",
        ]);

        assert_eq!(cli.service_name.as_deref(), Some("MyMonitor"));
        assert_eq!(cli.config, Some(PathBuf::from("monitor.toml")));
    }

    #[test]
    fn defaults_are_unset() {
        let cli = Cli::parse_from_iter(["ipv6-monitor"]);

        assert!(cli.command.is_none());
        assert!(cli.bot_token.is_none());
        assert!(cli.check_interval.is_none());
        assert!(cli.log_level.is_none());
        assert!(!cli.late_start_alert);
    }
}

mod init_command {
    use super::*;

    #[test]
    fn init_default_output() {
        let cli = Cli::parse_from_iter(["ipv6-monitor", "init"]);

        assert!(cli.is_init());
        let Some(Command::Init { output }) = cli.command else {
            panic!("expected init command");
        };
        assert_eq!(output, PathBuf::from("ipv6-monitor.toml"));
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["ipv6-monitor", "init", "-o", "custom.toml"]);

        let Some(Command::Init { output }) = cli.command else {
            panic!("expected init command");
        };
        assert_eq!(output, PathBuf::from("custom.toml"));
    }

    #[test]
    fn run_mode_is_not_init() {
        let cli = Cli::parse_from_iter(["ipv6-monitor", "--chat-id", "1"]);

        assert!(!cli.is_init());
    }
}

mod conversions {
    use super::*;

    #[test]
    fn ip_version_to_family() {
        assert_eq!(IpFamily::from(IpVersionArg::V4), IpFamily::V4);
        assert_eq!(IpFamily::from(IpVersionArg::V6), IpFamily::V6);
    }

    #[test]
    fn log_level_to_tracing_level() {
        assert_eq!(tracing::Level::from(LogLevelArg::Trace), tracing::Level::TRACE);
        assert_eq!(tracing::Level::from(LogLevelArg::Warn), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(LogLevelArg::Error), tracing::Level::ERROR);
    }
}

mod rejection {
    use super::*;
    use clap::Parser;

    #[test]
    fn unknown_ip_version_is_rejected() {
        let result = Cli::try_parse_from(["ipv6-monitor", "--ip-version", "both"]);

        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_interval_is_rejected() {
        let result = Cli::try_parse_from(["ipv6-monitor", "--check-interval", "five"]);

        assert!(result.is_err());
    }
}
