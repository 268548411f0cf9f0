//! Error types for the sra-alarms crate.

use thiserror::Error;

/// Errors that can occur while synthesizing or merging alarm resources.
#[derive(Debug, Error)]
pub enum AlarmError {
    /// A required alarm-group field is missing or blank.
    #[error("missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// A threshold entry cannot produce a valid alarm.
    #[error("invalid threshold at index {index}: {reason}")]
    InvalidThreshold {
        /// Position of the threshold within the group.
        index: usize,
        /// The reason the threshold is invalid.
        reason: String,
    },

    /// The configuration document is malformed.
    #[error("invalid configuration: {reason}")]
    Config {
        /// The reason the configuration was rejected.
        reason: String,
    },

    /// The target template cannot accept resources.
    #[error("invalid template: {reason}")]
    Template {
        /// The reason the template was rejected.
        reason: String,
    },

    /// An alarm group failed to build.
    #[error("alarm group {index}: {source}")]
    Group {
        /// Position of the group within `custom.SuccessRateAlarm`.
        index: usize,
        /// The underlying error.
        #[source]
        source: Box<AlarmError>,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AlarmError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for AlarmError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type for alarm operations.
pub type Result<T> = std::result::Result<T, AlarmError>;
