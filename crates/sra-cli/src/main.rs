//! Success-rate alarm CLI binary entrypoint.
//!
//! This is the main entry point for the `success-rate-alarm` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sra_cli::cli::{Cli, Commands};
use sra_cli::commands::{PackageCommand, RenderCommand};
use sra_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), sra_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Render(args) => {
            RenderCommand::new().execute(&mut stdout, &format, &args)?;
        }
        Commands::Package(args) => {
            PackageCommand::new().execute(&mut stdout, &format, &args)?;
        }
    }

    Ok(())
}
