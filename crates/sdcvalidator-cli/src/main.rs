//! sdcvalidate - command-line interface for two-tier SDC4 validation
//!
//! This is the main entry point for the sdcvalidate CLI, providing commands
//! for validating instances, classifying recorded error streams and checking
//! data model schemas for xsd:extension.
//!
//! Exit codes: 0 valid, 1 semantic errors only, 2 structural errors, a
//! compliance violation or any other failure.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::{FailureReport, OutputWriter};
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Configuration feeds logging, so it is loaded first; errors surface after setup
    let config = Config::load_with_file(cli.config.as_deref());

    if let Err(e) = init_logging(&cli, config.as_ref().ok()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let color_enabled = config.as_ref().map(|c| c.output.color).unwrap_or(true);
    control::set_override(cli.use_color() && color_enabled);

    let format = cli
        .output
        .or_else(|| config.as_ref().ok().map(|c| c.output.format))
        .unwrap_or(cli::OutputFormat::Human);
    let progress = config.as_ref().map(|c| c.output.progress).unwrap_or(true);
    let mut output = OutputWriter::new(
        format,
        control::SHOULD_COLORIZE.should_colorize(),
        cli.quiet,
        cli.verbosity_level(),
    )
    .with_progress(progress);

    let result = config.and_then(|config| run(cli, &config, &mut output));

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            let failure = FailureReport {
                error: e.to_string(),
                exit_code: e.exit_code(),
            };
            let reported = output.failure(&failure).unwrap_or(false);
            if !reported {
                eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

                if e.should_show_help() {
                    eprintln!("\nFor more information, try '--help'");
                }
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config, output), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config, output: &mut OutputWriter) -> Result<i32> {
    let _timer = Timer::new("cli_execution");

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, config, output),
        Commands::Classify(args) => handlers::handle_classify(args, config, output),
        Commands::CheckSchema(args) => handlers::handle_check_schema(args, config, output),
        Commands::Config(args) => handlers::handle_config(args, config, output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    if let Some(config) = config {
        logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    }

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["sdcvalidate", "-vv", "classify", "errors.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["sdcvalidate", "--quiet", "check-schema", "dm.xsd"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
