//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;

use super::OutputFormat;

/// Default output format.
pub const OUTPUT_FORMAT: OutputFormat = OutputFormat::Text;

/// Default file name written by `ifbrowse init`.
pub const CONFIG_FILE_NAME: &str = "ifbrowse.toml";

/// Directory under the user's config directory searched for a config file.
pub const CONFIG_DIR_NAME: &str = "ifbrowse";

/// Per-user configuration file, loaded when `--config` is not given.
///
/// `~/.config/ifbrowse/ifbrowse.toml` on Linux; `None` when the platform
/// has no config directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
