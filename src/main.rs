//! ifbrowse: list network interfaces, their flags, and their addresses
//!
//! Entry point for the ifbrowse application.

use ifbrowse::InterfaceBrowser;
use ifbrowse::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::Outcome;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    setup_tracing(cli.verbose);

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };
    tracing::debug!("{config}");

    run_application(&config)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs the listing or lookup against the platform's interfaces.
///
/// Excluded from coverage - requires the native backend.
#[cfg(not(tarpaulin_include))]
fn run_application(config: &ValidatedConfig) -> ExitCode {
    let browser = match InterfaceBrowser::new() {
        Ok(browser) => browser,
        Err(e) => {
            tracing::error!("Application error: {e}");
            return exit_code::runtime_error();
        }
    };

    let result = run::execute(&browser, config, &mut std::io::stdout().lock());
    browser.close();

    match result {
        Ok(Outcome::Shown(count)) => {
            tracing::debug!(interfaces = count, "Finished");
            exit_code::SUCCESS
        }
        Ok(Outcome::NotFound) => {
            if let Some(ref target) = config.target {
                eprintln!("No interface matches {target}");
            }
            exit_code::not_found()
        }
        Err(e) => {
            tracing::error!("Application error: {e}");
            exit_code::runtime_error()
        }
    }
}
