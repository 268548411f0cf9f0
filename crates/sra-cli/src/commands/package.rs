//! Package command implementation.
//!
//! Reads the compiled template, merges the declared alarms into its
//! `Resources` and writes the result:
//! - to `--output` when given, printing a summary on `writer`
//! - otherwise to `writer` as JSON

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::Value;
use sra_alarms::{PackageSummary, Packager};
use tracing::info;

use crate::cli::PackageArgs;
use crate::commands::load_config;
use crate::error::CliError;
use crate::output::{OutputFormat, PackageReport, write_json};

/// Package command executor.
#[derive(Debug, Default)]
pub struct PackageCommand;

impl PackageCommand {
    /// Create a new package command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Execute the package command.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read, packaging fails, or the
    /// output cannot be written.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &PackageArgs,
    ) -> Result<(), CliError> {
        let mut template = read_template(&args.template)?;
        let summary = self.package(args, &mut template)?;

        match &args.output {
            Some(path) => {
                let mut file = fs::File::create(path)?;
                write_json(&mut file, &template)?;
                info!(path = %path.display(), "wrote packaged template");
                format.write(writer, &PackageReport { summary })?;
            }
            None => write_json(writer, &template)?,
        }
        Ok(())
    }

    /// Merges the alarms declared by the config in `args` into `template`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or packaging fails.
    pub fn package(
        &self,
        args: &PackageArgs,
        template: &mut Value,
    ) -> Result<PackageSummary, CliError> {
        let mut packager = Packager::new(load_config(&args.config)?);
        if let Some(region) = &args.region {
            packager = packager.with_region(region);
        }
        Ok(packager.package(template)?)
    }
}

fn read_template(path: &Path) -> Result<Value, CliError> {
    let source = fs::read_to_string(path)
        .map_err(|e| CliError::Input(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&source)
        .map_err(|e| CliError::Input(format!("{} is not a JSON template: {e}", path.display())))
}
