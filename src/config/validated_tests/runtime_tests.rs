//! Tests for monitoring behavior configuration: interval, timeout, family, probe URL.

use std::time::Duration;

use crate::monitor::MAX_CHECK_INTERVAL;
use crate::probe::IpFamily;

use super::*;

mod check_interval {
    use super::*;

    #[test]
    fn default_is_five_minutes() {
        let config = ValidatedConfig::from_raw(&cli_with_credentials(&[]), None).unwrap();

        assert_eq!(config.check_interval, Duration::from_secs(300));
    }

    #[test]
    fn zero_interval_returns_error() {
        let cli = cli_with_credentials(&["--check-interval", "0"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "check_interval",
                ..
            })
        ));
    }

    #[test]
    fn one_week_is_accepted() {
        let cli = cli_with_credentials(&["--check-interval", "10080"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.check_interval, MAX_CHECK_INTERVAL);
    }

    #[test]
    fn longer_than_one_week_returns_error() {
        let cli = cli_with_credentials(&["--check-interval", "10081"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "check_interval",
                ..
            })
        ));
    }

    #[test]
    fn interval_past_instant_range_returns_error() {
        let cli = cli_with_credentials(&["--check-interval", "300000000000000000"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "check_interval",
                ..
            })
        ));
    }

    #[test]
    fn overflowing_interval_returns_error() {
        let max = u64::MAX.to_string();
        let cli = cli_with_credentials(&["--check-interval", &max]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "check_interval",
                ..
            })
        ));
    }
}

mod http_timeout {
    use super::*;

    #[test]
    fn default_is_thirty_seconds() {
        let config = ValidatedConfig::from_raw(&cli_with_credentials(&[]), None).unwrap();

        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_timeout_returns_error() {
        let cli = cli_with_credentials(&["--http-timeout", "0"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "http_timeout",
                ..
            })
        ));
    }
}

mod family {
    use super::*;

    #[test]
    fn default_is_ipv6() {
        let config = ValidatedConfig::from_raw(&cli_with_credentials(&[]), None).unwrap();

        assert_eq!(config.family, IpFamily::V6);
    }

    #[test]
    fn toml_aliases_are_accepted() {
        for (value, expected) in [("IPv4", IpFamily::V4), ("6", IpFamily::V6)] {
            let toml = toml(&format!("[monitor]\nip_version = \"{value}\""));
            let config =
                ValidatedConfig::from_raw(&cli_with_credentials(&[]), Some(&toml)).unwrap();

            assert_eq!(config.family, expected);
        }
    }

    #[test]
    fn unknown_toml_version_returns_error() {
        let toml = toml("[monitor]\nip_version = \"both\"");
        let result = ValidatedConfig::from_raw(&cli_with_credentials(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidIpVersion { ref value }) if value == "both"
        ));
    }
}

mod probe_url {
    use super::*;

    #[test]
    fn default_follows_family() {
        let v6 = ValidatedConfig::from_raw(&cli_with_credentials(&[]), None).unwrap();
        let v4 =
            ValidatedConfig::from_raw(&cli_with_credentials(&["--ip-version", "ipv4"]), None)
                .unwrap();

        assert_eq!(v6.probe_url.as_str(), "https://ipv6.icanhazip.com/");
        assert_eq!(v4.probe_url.as_str(), "https://ipv4.icanhazip.com/");
    }

    #[test]
    fn custom_url_is_kept() {
        let cli = cli_with_credentials(&["--probe-url", "http://192.0.2.1:8080/ip"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.probe_url.as_str(), "http://192.0.2.1:8080/ip");
    }

    #[test]
    fn non_http_scheme_returns_error() {
        let cli = cli_with_credentials(&["--probe-url", "ftp://example.com/ip"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn unparseable_url_returns_error() {
        let cli = cli_with_credentials(&["--probe-url", "not a url"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }
}

mod templates {
    use super::*;
    use crate::alert::{Alert, AlertTemplates};

    #[test]
    fn defaults_when_not_configured() {
        let config = ValidatedConfig::from_raw(&cli_with_credentials(&[]), None).unwrap();

        assert_eq!(config.templates, AlertTemplates::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let toml = toml(
            r#"
            [messages]
            stopped = "bye"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli_with_credentials(&[]), Some(&toml)).unwrap();

        let stopped = config
            .templates
            .render(&Alert::Stopped, IpFamily::V6)
            .unwrap();
        let started = config
            .templates
            .render(&Alert::Started { address: "::1" }, IpFamily::V6)
            .unwrap();
        assert_eq!(stopped, "bye");
        assert!(started.starts_with("🚀 Service started"));
    }

    #[test]
    fn syntax_error_is_config_error() {
        let toml = toml(
            r#"
            [messages]
            changed = "{{#if current}}never closed"
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli_with_credentials(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidTemplate { ref reason }) if reason.starts_with("changed")
        ));
    }
}

mod service_name {
    use super::*;

    #[test]
    fn default_service_name() {
        let config = ValidatedConfig::from_raw(&cli_with_credentials(&[]), None).unwrap();

        assert_eq!(config.service_name, "IPv6MonitorService");
    }

    #[test]
    fn blank_service_name_returns_error() {
        let cli = cli_with_credentials(&["--service-name", " "]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::EmptyValue {
                field: "service_name"
            })
        ));
    }
}
