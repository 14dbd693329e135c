//! Tests for CLI vs TOML precedence rules.

use crate::network::InterfaceRecord;
use crate::network::filter::InterfaceFilter;

use super::*;

fn named(name: &str) -> InterfaceRecord {
    InterfaceRecord::builder(1, name).build()
}

mod cli_precedence {
    use super::*;

    #[test]
    fn cli_format_overrides_toml() {
        let toml = toml(
            r#"
            [output]
            format = "json"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--format", "text"]), Some(&toml)).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn cli_json_flag_overrides_toml() {
        let toml = toml(
            r#"
            [output]
            format = "text"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--json"]), Some(&toml)).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn cli_include_replaces_toml_include() {
        let toml = toml(
            r#"
            [filter]
            include = ["^wlan"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--include", "^eth"]), Some(&toml)).unwrap();

        assert_eq!(config.filter.include_count(), 1);
        assert!(config.filter.matches(&named("eth0")));
        assert!(!config.filter.matches(&named("wlan0")));
    }

    #[test]
    fn cli_include_keeps_toml_exclude() {
        let toml = toml(
            r#"
            [filter]
            include = ["^wlan"]
            exclude = ["^eth1$"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--include", "^eth"]), Some(&toml)).unwrap();

        assert!(config.filter.matches(&named("eth0")));
        assert!(!config.filter.matches(&named("eth1")));
    }

    #[test]
    fn cli_exclude_replaces_toml_exclude() {
        let toml = toml(
            r#"
            [filter]
            exclude = ["^eth"]
        "#,
        );

        let config =
            ValidatedConfig::from_raw(&cli(&["--exclude", "^docker"]), Some(&toml)).unwrap();

        assert_eq!(config.filter.exclude_count(), 1);
        assert!(config.filter.matches(&named("eth0")));
        assert!(!config.filter.matches(&named("docker0")));
    }
}

mod toml_fallback {
    use super::*;

    #[test]
    fn toml_format_used_without_cli() {
        let toml = toml(
            r#"
            [output]
            format = "JSON"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn invalid_toml_format_returns_error() {
        let toml = toml(
            r#"
            [output]
            format = "yaml"
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidFormat { ref value }) if value == "yaml"
        ));
    }

    #[test]
    fn toml_patterns_used_without_cli() {
        let toml = toml(
            r#"
            [filter]
            include = ["^eth", "^en"]
            exclude = ["^en9"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.filter.include_count(), 2);
        assert_eq!(config.filter.exclude_count(), 1);
        assert!(config.filter.matches(&named("en0")));
        assert!(!config.filter.matches(&named("en9")));
    }

    #[test]
    fn toml_boolean_cannot_be_disabled_by_cli() {
        let toml = toml(
            r"
            [filter]
            skip_loopback = true
        ",
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert_eq!(config.filter.exclude_count(), 1);
    }
}

mod defaults {
    use super::*;

    #[test]
    fn default_format_is_text() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.target, None);
        assert!(!config.verbose);
    }

    #[test]
    fn empty_toml_keeps_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml(""))).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.filter.is_empty());
    }
}

mod target {
    use super::*;

    #[test]
    fn digits_are_an_index() {
        let config = ValidatedConfig::from_raw(&cli(&["7"]), None).unwrap();
        assert_eq!(config.target, Some(Target::Index(7)));
    }

    #[test]
    fn anything_else_is_a_name() {
        assert_eq!(Target::parse("eth0"), Target::Name("eth0".to_string()));
        assert_eq!(Target::parse("+7"), Target::Name("+7".to_string()));
        assert_eq!(
            Target::parse("{4D36E972-E325-11CE-BFC1-08002BE10318}"),
            Target::Name("{4D36E972-E325-11CE-BFC1-08002BE10318}".to_string())
        );
    }

    #[test]
    fn overflowing_digits_are_a_name() {
        assert_eq!(
            Target::parse("99999999999"),
            Target::Name("99999999999".to_string())
        );
    }

    #[test]
    fn display() {
        assert_eq!(Target::Index(3).to_string(), "index 3");
        assert_eq!(Target::Name("en0".to_string()).to_string(), "'en0'");
    }
}
