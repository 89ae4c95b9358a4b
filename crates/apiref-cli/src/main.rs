//! apiref CLI - API reference from OpenAPI documents
//!
//! This is the main entry point for the apiref CLI application, providing
//! commands for listing the schemas and operations of an OpenAPI document
//! together with synthesized examples and type descriptions.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod markup;
mod output;
mod source;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use source::ApiSource;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Logging settings live in the config file, so it is read first
    let config = Config::load_with_file(cli.config.as_deref());

    let use_color = cli.use_color()
        && config.as_ref().map_or(true, |config| config.output.color);
    control::set_override(use_color);

    let guard = match init_logging(&cli, config.as_ref().ok()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let result = match config {
        Ok(config) => run(cli, config, use_color).await,
        Err(e) => Err(e),
    };

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, use_color));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            e.exit_code()
        }
    };

    // Flush the log file before exiting
    drop(guard);
    process::exit(code);
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
async fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");
    config.validate()?;

    let format = cli
        .output
        .or_else(|| OutputFormat::from_name(&config.output.format))
        .unwrap_or(OutputFormat::Human);
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        session = ?logging::current_session_id(),
        "Executing command"
    );

    match cli.command {
        Commands::Completions(args) => handlers::handle_completions(args),
        command => {
            let source = ApiSource::resolve(cli.api.as_deref(), &config)?;
            let document = source::load_document(&source, &config, &output).await?;

            match command {
                Commands::Schemas(args) => handlers::handle_schemas(args, &document, &mut output),
                Commands::Example(args) => handlers::handle_example(args, &document, &mut output),
                Commands::Type(args) => {
                    handlers::handle_type(args, &document, &config, &mut output)
                }
                Commands::Endpoints(args) => {
                    handlers::handle_endpoints(args, &document, &mut output)
                }
                Commands::Endpoint(args) => handlers::handle_endpoint(args, &document, &mut output),
                Commands::Completions(args) => handlers::handle_completions(args),
            }
        }
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<Option<WorkerGuard>> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    // Config file, then environment overrides
    if let Some(config) = config {
        logging_config.apply_settings(&config.logging, verbosity);
    }
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}
