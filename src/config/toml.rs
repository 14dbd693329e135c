//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Output configuration section
    #[serde(default)]
    pub output: OutputSection,

    /// Interface filter configuration
    #[serde(default)]
    pub filter: FilterSection,
}

/// Output configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output format: "text" or "json"
    pub format: Option<String>,
}

/// Interface filter configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Regex patterns for interface names to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for interface names to exclude
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Hide loopback interfaces
    #[serde(default)]
    pub skip_loopback: bool,

    /// Hide interfaces that are not up
    #[serde(default)]
    pub up_only: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// A leading `~` in `path` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = expand_tilde(path);
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
            path: path.clone(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Replaces a leading `~` component with the home directory.
///
/// Paths without one, and every path when the home directory is unknown,
/// come back unchanged. `~user` forms are not expanded.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ifbrowse Configuration File
#
# Explicit command-line options override these values.

[output]
# Output format: "text" (ifconfig style) or "json" (default: text)
# format = "text"

[filter]
# Regex patterns for interface names to include (empty = all)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^eth", "^en"]

# Regex patterns for interface names to exclude
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^docker", "^veth"]

# Hide loopback interfaces
skip_loopback = false

# Hide interfaces that are not up
# up_only = false
"#
    .to_string()
}
