//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Success-rate alarm packaging for API Gateway stages.
#[derive(Parser, Debug, Clone)]
#[command(name = "success-rate-alarm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the alarm resources declared by a service.
    Render(RenderArgs),

    /// Merge the alarm resources into a compiled template.
    Package(PackageArgs),
}

/// Arguments for the render command.
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Service document (`.yml`/`.yaml` or JSON).
    #[arg(short, long)]
    pub config: PathBuf,

    /// Deployment region, overriding `provider.region`.
    #[arg(short, long, env = "SRA_REGION")]
    pub region: Option<String>,
}

/// Arguments for the package command.
#[derive(Parser, Debug, Clone)]
pub struct PackageArgs {
    /// Service document (`.yml`/`.yaml` or JSON).
    #[arg(short, long)]
    pub config: PathBuf,

    /// Compiled CloudFormation template (JSON).
    #[arg(short, long)]
    pub template: PathBuf,

    /// Deployment region, overriding `provider.region`.
    #[arg(short, long, env = "SRA_REGION")]
    pub region: Option<String>,

    /// Where to write the merged template. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
