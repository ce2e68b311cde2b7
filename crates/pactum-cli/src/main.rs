//! Pactum CLI - typed data contracts for LLM output
//!
//! This is the main entry point for the Pactum CLI application, providing
//! commands for rendering prompts and examples from schema declarations
//! and for validating and repairing model output.

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
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    // Configuration feeds logging, so it is loaded first
    let config = Config::load_with_file(cli.config.as_deref());
    let use_color = cli.use_color()
        && config.as_ref().map(|c| c.output.color).unwrap_or(true);
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, config.as_ref().ok()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = config.and_then(|config| run(cli, config, use_color));

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, use_color));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = match cli.output {
        Some(format) => format,
        None => config.output.output_format()?,
    };
    let mut output = OutputWriter::new(format, use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        format = ?format,
        "Executing command"
    );

    match cli.command {
        Commands::Prompt(args) => handlers::handle_prompt(args, &config, &mut output),
        Commands::Example(args) => handlers::handle_example(args, &config, &mut output),
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output),
        Commands::Repair(args) => handlers::handle_repair(args, &config, &mut output),
        Commands::Inspect(args) => handlers::handle_inspect(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    if let Some(config) = config {
        logging_config.merge_with_config(&config.logging, cli.verbosity_level());
    }
    logging_config.merge_with_env();

    // Quiet mode only logs errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
