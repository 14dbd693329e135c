//! Application execution logic.
//!
//! Renders either one interface or a filtered listing to any writer.

use std::io::{self, Write};

use thiserror::Error;

use ifbrowse::config::{OutputFormat, Target, ValidatedConfig};
use ifbrowse::network::InterfaceFetcher;
use ifbrowse::network::filter::InterfaceFilter;
use ifbrowse::{BrowserError, InterfaceBrowser, InterfaceRecord};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The browser could not read the interfaces.
    #[error("Failed to read interfaces: {0}")]
    Browser(#[from] BrowserError),

    /// Writing to the output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// JSON encoding failed.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// This many interfaces were written.
    Shown(usize),
    /// The requested interface does not exist.
    NotFound,
}

/// Writes the interfaces selected by `config` to `out`.
///
/// A target bypasses the filter: asking for an interface by name always
/// shows it if it exists.
///
/// # Errors
///
/// Returns [`RunError`] if the browser fails or `out` cannot be written.
pub fn execute<F, W>(
    browser: &InterfaceBrowser<F>,
    config: &ValidatedConfig,
    out: &mut W,
) -> Result<Outcome, RunError>
where
    F: InterfaceFetcher,
    W: Write,
{
    match config.target {
        Some(ref target) => show_one(browser, target, config.format, out),
        None => list(browser, config, out),
    }
}

fn show_one<F: InterfaceFetcher, W: Write>(
    browser: &InterfaceBrowser<F>,
    target: &Target,
    format: OutputFormat,
    out: &mut W,
) -> Result<Outcome, RunError> {
    let found = match target {
        Target::Index(index) => browser.get_by_index(*index)?,
        Target::Name(name) => browser.get_by_name(name)?,
    };
    let Some(record) = found else {
        tracing::debug!(%target, "Interface not found");
        return Ok(Outcome::NotFound);
    };

    match format {
        OutputFormat::Text => writeln!(out, "{record}")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &*record)?;
            writeln!(out)?;
        }
    }
    Ok(Outcome::Shown(1))
}

fn list<F: InterfaceFetcher, W: Write>(
    browser: &InterfaceBrowser<F>,
    config: &ValidatedConfig,
    out: &mut W,
) -> Result<Outcome, RunError> {
    match config.format {
        OutputFormat::Text => {
            let mut shown = 0;
            let mut failure = None;
            browser.for_each(|record| {
                if !config.filter.matches(record) {
                    return true;
                }
                match writeln!(out, "{record}") {
                    Ok(()) => {
                        shown += 1;
                        true
                    }
                    Err(e) => {
                        failure = Some(e);
                        false
                    }
                }
            })?;

            match failure {
                Some(e) => Err(e.into()),
                None => Ok(Outcome::Shown(shown)),
            }
        }
        OutputFormat::Json => {
            let records = browser.list()?;
            let selected: Vec<&InterfaceRecord> = records
                .iter()
                .filter(|record| config.filter.matches(record))
                .collect();

            serde_json::to_writer_pretty(&mut *out, &selected)?;
            writeln!(out)?;
            Ok(Outcome::Shown(selected.len()))
        }
    }
}
