//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_telegram_section() {
        let toml = r#"
            [telegram]
            bot_token = "123456:ABC"
            chat_id = "42"
            api_url = "http://localhost:8081"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.telegram.bot_token.as_deref(), Some("123456:ABC"));
        assert_eq!(config.telegram.chat_id.as_deref(), Some("42"));
        assert_eq!(
            config.telegram.api_url.as_deref(),
            Some("http://localhost:8081")
        );
    }

    #[test]
    fn parse_monitor_section() {
        let toml = r#"
            [monitor]
            check_interval = 10
            ip_version = "ipv4"
            probe_url = "https://api.ipify.org"
            http_timeout = 20
            late_start_alert = true
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let monitor = &config.monitor;

        assert_eq!(monitor.check_interval, Some(10));
        assert_eq!(monitor.ip_version.as_deref(), Some("ipv4"));
        assert_eq!(monitor.probe_url.as_deref(), Some("https://api.ipify.org"));
        assert_eq!(monitor.http_timeout, Some(20));
        assert!(monitor.late_start_alert);
    }

    #[test]
    fn parse_messages_log_and_service() {
        let toml = r#"
            [messages]
            started = "up {{address}}"
            stopped = "down"

            [log]
            level = "debug"
            file = "~/logs/monitor.log"

            [service]
            name = "Monitor"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.messages.started.as_deref(), Some("up {{address}}"));
        assert!(config.messages.changed.is_none());
        assert_eq!(config.messages.stopped.as_deref(), Some("down"));
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(config.log.file.as_deref(), Some("~/logs/monitor.log"));
        assert_eq!(config.service.name.as_deref(), Some("Monitor"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.telegram.bot_token.is_none());
        assert!(config.monitor.check_interval.is_none());
        assert!(!config.monitor.late_start_alert);
        assert!(config.log.level.is_none());
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let toml = r#"
            [webhook]
            url = "https://example.com"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [telegram]
            token = "abc"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let toml = r#"
            [monitor]
            check_interval = "five"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn load_missing_file_is_file_read_error() {
        let result = TomlConfig::load(std::path::Path::new("/nonexistent/ipv6-monitor.toml"));

        assert!(matches!(
            result,
            Err(super::super::ConfigError::FileRead { .. })
        ));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.monitor.check_interval, Some(5));
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn default_template_documents_required_fields() {
        let template = default_config_template();

        assert!(template.contains("bot_token"));
        assert!(template.contains("chat_id"));
        assert!(template.contains("[messages]"));
    }
}
