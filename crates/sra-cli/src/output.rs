//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};
use sra_alarms::PackageSummary;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                write_json(writer, value)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }
}

/// Writes `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
    writeln!(writer)?;
    Ok(())
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Rendered alarm resources, keyed by logical ID.
///
/// Serializes as the bare `logicalId -> resource` mapping so the JSON output
/// can be merged into a template as-is.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AlarmFragments {
    /// The resources.
    pub resources: Map<String, Value>,
}

impl TableDisplay for AlarmFragments {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.resources.is_empty() {
            writeln!(writer, "No success-rate alarms declared")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<40}  {:>9}  {:>5}  {:>6}  {:<12}  {}",
            "LOGICAL ID", "THRESHOLD", "EVALS", "PERIOD", "MISSING DATA", "ALARM NAME"
        )?;
        writeln!(writer, "{}", "─".repeat(100))?;

        for (logical_id, resource) in &self.resources {
            let props = &resource["Properties"];
            writeln!(
                writer,
                "{:<40}  {:>9}  {:>5}  {:>6}  {:<12}  {}",
                truncate(logical_id, 40),
                display(&props["Threshold"]),
                display(&props["EvaluationPeriods"]),
                display(&props["Metrics"][1]["MetricStat"]["Period"]),
                display(&props["TreatMissingData"]),
                display(&props["AlarmName"]),
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} alarm(s)", self.resources.len())?;
        Ok(())
    }
}

/// Result of a packaging run.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PackageReport {
    /// Summary returned by the packager.
    pub summary: PackageSummary,
}

impl TableDisplay for PackageReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Success-Rate Alarms")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Region:           {}", self.summary.region)?;
        writeln!(writer, "Groups:           {}", self.summary.groups)?;
        writeln!(writer, "Alarms merged:    {}", self.summary.logical_ids.len())?;
        for logical_id in &self.summary.logical_ids {
            writeln!(writer, "  {logical_id}")?;
        }
        Ok(())
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
