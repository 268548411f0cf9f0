//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`render`] - Print the alarm resources declared by a service
//! - [`package`] - Merge the alarm resources into a compiled template

pub mod package;
pub mod render;

pub use package::PackageCommand;
pub use render::RenderCommand;

use std::fs;
use std::path::Path;

use sra_alarms::ServiceConfig;
use tracing::debug;

use crate::error::CliError;

/// Loads a service document, choosing YAML or JSON by file extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<ServiceConfig, CliError> {
    let source = fs::read_to_string(path)
        .map_err(|e| CliError::Input(format!("cannot read {}: {e}", path.display())))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

    debug!(path = %path.display(), yaml = is_yaml, "loading service config");

    let config = if is_yaml {
        ServiceConfig::from_yaml_str(&source)?
    } else {
        ServiceConfig::from_json_str(&source)?
    };
    Ok(config)
}
