//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::flags::InterfaceFlag;
use crate::network::filter::{FilterChain, FlagFilter, NameRegexFilter, Negate};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::{TomlConfig, expand_tilde};

/// How listings are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// ifconfig-style text
    Text,
    /// JSON document
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// The interface a single-interface query asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Lookup by interface index.
    Index(u32),
    /// Lookup by name or adapter GUID.
    Name(String),
}

impl Target {
    /// Digits-only text is an index; anything else is a name.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = text.parse() {
                return Self::Index(index);
            }
        }
        Self::Name(text.to_string())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "index {index}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Single interface to show; `None` lists every interface
    pub target: Option<Target>,

    /// Output format
    pub format: OutputFormat,

    /// Filter applied to listings (not to single-interface lookups)
    pub filter: FilterChain,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self
            .target
            .as_ref()
            .map_or_else(|| "all".to_string(), ToString::to_string);

        write!(
            f,
            "Config {{ target: {target}, format: {}, includes: {}, excludes: {} }}",
            self.format,
            self.filter.include_count(),
            self.filter.exclude_count(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Regex patterns are invalid
    /// - The TOML output format is not recognised
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let format = Self::resolve_format(cli, toml)?;
        let filter = Self::build_filter(cli, toml)?;

        Ok(Self {
            target: cli.target.as_deref().map(Target::parse),
            format,
            filter,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. Otherwise
    /// the per-user file from [`defaults::user_config_path`] is used when it
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::user_config_path().filter(|p| p.is_file()));

        let toml = if let Some(ref path) = path {
            tracing::debug!(path = %path.display(), "Loading config file");
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_format(cli: &Cli, toml: Option<&TomlConfig>) -> Result<OutputFormat, ConfigError> {
        // Priority: CLI explicit > TOML > default
        if let Some(format) = cli.explicit_format() {
            return Ok(format);
        }

        toml.and_then(|t| t.output.format.as_deref())
            .map_or(Ok(defaults::OUTPUT_FORMAT), str::parse)
    }

    fn build_filter(cli: &Cli, toml: Option<&TomlConfig>) -> Result<FilterChain, ConfigError> {
        let mut filter = FilterChain::new();

        // Boolean flags enable from either source
        let skip_loopback = cli.skip_loopback || toml.is_some_and(|t| t.filter.skip_loopback);
        let up_only = cli.up_only || toml.is_some_and(|t| t.filter.up_only);

        if skip_loopback {
            filter = filter.exclude(FlagFilter::new([InterfaceFlag::Loopback]));
        }
        if up_only {
            filter = filter.exclude(Negate(FlagFilter::new([InterfaceFlag::Up])));
        }

        // CLI patterns replace TOML patterns, per direction
        let includes = if cli.include.is_empty() {
            toml.map_or(&[][..], |t| t.filter.include.as_slice())
        } else {
            cli.include.as_slice()
        };
        for pattern in includes {
            filter = filter.include(compile(pattern)?);
        }

        let excludes = if cli.exclude.is_empty() {
            toml.map_or(&[][..], |t| t.filter.exclude.as_slice())
        } else {
            cli.exclude.as_slice()
        };
        for pattern in excludes {
            filter = filter.exclude(compile(pattern)?);
        }

        Ok(filter)
    }
}

/// Writes the default configuration template to a file.
///
/// A leading `~` in `path` is expanded to the home directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let path = expand_tilde(path);
    let template = super::toml::default_config_template();
    std::fs::write(&path, template).map_err(|e| ConfigError::FileWrite { path, source: e })
}

fn compile(pattern: &str) -> Result<NameRegexFilter, ConfigError> {
    NameRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}
