//! Tests for TOML configuration parsing.

use std::path::Path;

use super::toml::{TomlConfig, default_config_template, expand_tilde};

mod parsing {
    use super::*;

    #[test]
    fn parse_output_section() {
        let toml = r#"
            [output]
            format = "json"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn parse_filter_section() {
        let toml = r#"
            [filter]
            include = ["^eth", "^wlan"]
            exclude = ["^docker", "^veth"]
            skip_loopback = true
            up_only = true
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let filter = &config.filter;

        assert_eq!(filter.include, vec!["^eth", "^wlan"]);
        assert_eq!(filter.exclude, vec!["^docker", "^veth"]);
        assert!(filter.skip_loopback);
        assert!(filter.up_only);
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.output.format.is_none());
        assert!(config.filter.include.is_empty());
        assert!(config.filter.exclude.is_empty());
        assert!(!config.filter.skip_loopback);
        assert!(!config.filter.up_only);
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
            [output]
            format = "text"
            colour = "always"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn reject_unknown_sections() {
        let toml = r#"
            [monitor]
            interval = 5
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn reject_wrong_types() {
        let toml = r#"
            [filter]
            include = "^eth"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }
}

mod tilde {
    use super::*;

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(expand_tilde(Path::new("/etc/ifbrowse.toml")), Path::new("/etc/ifbrowse.toml"));
        assert_eq!(expand_tilde(Path::new("ifbrowse.toml")), Path::new("ifbrowse.toml"));
    }

    #[test]
    fn named_user_form_is_unchanged() {
        assert_eq!(expand_tilde(Path::new("~bob/x.toml")), Path::new("~bob/x.toml"));
    }

    #[test]
    fn leading_tilde_uses_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            expand_tilde(Path::new("~/.config/ifbrowse.toml")),
            home.join(".config/ifbrowse.toml")
        );
    }
}

mod default_template {
    use super::*;

    #[test]
    fn template_is_valid_toml() {
        let template = default_config_template();
        let result = TomlConfig::parse(&template);
        assert!(
            result.is_ok(),
            "Template should be valid TOML: {:?}",
            result.err()
        );
    }

    #[test]
    fn template_contains_all_sections() {
        let template = default_config_template();

        assert!(
            template.contains("[output]"),
            "Template should contain output section"
        );
        assert!(
            template.contains("[filter]"),
            "Template should contain filter section"
        );
    }

    #[test]
    fn template_documents_every_option() {
        let template = default_config_template();

        for key in ["format", "include", "exclude", "skip_loopback", "up_only"] {
            assert!(template.contains(key), "Template should document {key}");
        }
    }

    #[test]
    fn template_values_are_defaults() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.output.format.is_none());
        assert!(!config.filter.skip_loopback);
        assert!(!config.filter.up_only);
    }
}
