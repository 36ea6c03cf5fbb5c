//! cloudreview - A CLI tool to audit AWS resource configurations against best-practice rules
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cloudreview::cli::commands::{audit, rules};
use cloudreview::cli::{exit_codes, Cli, Invocation};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    if cli.global.no_color {
        colored::control::set_override(false);
    }

    // Setup logging based on verbosity
    setup_logging(cli.global.verbose, cli.global.log_json);

    // Execute the appropriate command
    let result = match cli.command.invocation() {
        Invocation::Audit(selection, args) => audit::execute(&cli.global, selection, args).await,
        Invocation::Rules(args) => rules::execute(&cli.global, args).await,
    };

    // Handle exit codes for CI integration
    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn setup_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr; stdout carries the report
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
