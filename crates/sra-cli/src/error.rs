//! CLI error types.

use std::fmt;

use sra_alarms::AlarmError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Alarm synthesis or merging failed.
    Alarm(AlarmError),
    /// Invalid input file.
    Input(String),
    /// Output formatting error.
    Format(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alarm(e) => write!(f, "{e}"),
            Self::Input(msg) => write!(f, "input error: {msg}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Alarm(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<AlarmError> for CliError {
    fn from(err: AlarmError) -> Self {
        Self::Alarm(err)
    }
}
