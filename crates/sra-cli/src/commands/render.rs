//! Render command implementation.

use std::io::Write;

use sra_alarms::{Packager, fragments_to_map};

use crate::cli::RenderArgs;
use crate::commands::load_config;
use crate::error::CliError;
use crate::output::{AlarmFragments, OutputFormat};

/// Render command executor.
#[derive(Debug, Default)]
pub struct RenderCommand;

impl RenderCommand {
    /// Create a new render command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded, an alarm group is
    /// invalid, or output fails.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &RenderArgs,
    ) -> Result<(), CliError> {
        let fragments = self.render(args)?;
        format.write(writer, &fragments)?;
        Ok(())
    }

    /// Builds the alarm fragments declared by the config in `args`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or a group is invalid.
    pub fn render(&self, args: &RenderArgs) -> Result<AlarmFragments, CliError> {
        let mut packager = Packager::new(load_config(&args.config)?);
        if let Some(region) = &args.region {
            packager = packager.with_region(region);
        }

        let resources = packager.resources()?;
        Ok(AlarmFragments {
            resources: fragments_to_map(&resources)?,
        })
    }
}
