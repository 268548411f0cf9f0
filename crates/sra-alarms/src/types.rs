//! Input types for alarm synthesis.
//!
//! This module provides the declarative side of the crate:
//! - [`AlarmSpec`]: One alarm group as declared in the service configuration
//! - [`Threshold`]: A bare threshold value or a detailed threshold object
//! - [`ThresholdSpec`]: The normalized, detailed form of a threshold
//! - [`TreatMissingData`]: CloudWatch's missing-data evaluation policy
//! - [`MissingDataPolicy`]: The scalar-or-array `treatMissingData` field

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

use crate::error::{AlarmError, Result};

/// Default number of evaluation periods when a threshold does not set one.
pub const DEFAULT_EVALUATION_PERIODS: u32 = 1;

/// Default metric period in seconds when a threshold does not set one.
pub const DEFAULT_PERIOD_SECS: u32 = 900;

/// How CloudWatch treats missing data points when evaluating an alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreatMissingData {
    /// Missing points are neither good nor bad.
    Missing,
    /// The current alarm state is kept.
    Ignore,
    /// Missing points count as breaching.
    Breaching,
    /// Missing points count as within the threshold.
    NotBreaching,
}

impl TreatMissingData {
    /// All accepted policies.
    pub const ALL: [Self; 4] = [
        Self::Missing,
        Self::Ignore,
        Self::Breaching,
        Self::NotBreaching,
    ];

    /// Returns the policy as CloudWatch spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Ignore => "ignore",
            Self::Breaching => "breaching",
            Self::NotBreaching => "notBreaching",
        }
    }

    /// Parses a policy name. Matching is exact; anything else yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|policy| policy.as_str() == raw)
    }
}

impl std::fmt::Display for TreatMissingData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The `treatMissingData` field of an alarm group.
///
/// Values are kept raw so that unrecognized policies survive parsing and are
/// dropped when resolved, instead of failing the whole configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MissingDataPolicy {
    /// One policy applied to every threshold.
    Uniform(Option<String>),
    /// One policy per threshold, by position.
    PerThreshold(Vec<Option<String>>),
}

impl MissingDataPolicy {
    /// Creates a policy applied to every threshold.
    pub fn uniform(policy: impl Into<String>) -> Self {
        Self::Uniform(Some(policy.into()))
    }

    /// Creates a positional policy list.
    pub fn per_threshold<I, S>(policies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::PerThreshold(policies.into_iter().map(|p| Some(p.into())).collect())
    }

    /// Resolves the policy for the threshold at `index`.
    ///
    /// A uniform policy applies to every index. A positional list is indexed
    /// directly. Out-of-range indices and unrecognized values yield `None`.
    #[must_use]
    pub fn resolve(&self, index: usize) -> Option<TreatMissingData> {
        let raw = match self {
            Self::Uniform(raw) => raw.as_deref(),
            Self::PerThreshold(raws) => raws.get(index).and_then(Option::as_deref),
        };
        raw.and_then(TreatMissingData::parse)
    }
}

impl<'de> Deserialize<'de> for MissingDataPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        fn as_policy(value: serde_json::Value) -> Option<String> {
            match value {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            }
        }

        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Array(items) => {
                Self::PerThreshold(items.into_iter().map(as_policy).collect())
            }
            other => Self::Uniform(as_policy(other)),
        })
    }
}

/// The detailed form of a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdSpec {
    /// Success-rate percentage at or below which the alarm fires.
    pub value: f64,
    /// Number of periods the condition must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_periods: Option<u32>,
    /// Metric period in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

impl ThresholdSpec {
    /// Creates a threshold with default evaluation window.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            evaluation_periods: None,
            period: None,
        }
    }

    /// Sets the number of evaluation periods.
    #[must_use]
    pub const fn with_evaluation_periods(mut self, periods: u32) -> Self {
        self.evaluation_periods = Some(periods);
        self
    }

    /// Sets the metric period in seconds.
    #[must_use]
    pub const fn with_period(mut self, secs: u32) -> Self {
        self.period = Some(secs);
        self
    }

    /// Evaluation periods, falling back to the default when unset or zero.
    #[must_use]
    pub fn evaluation_periods(&self) -> u32 {
        self.evaluation_periods
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_EVALUATION_PERIODS)
    }

    /// Period in seconds, falling back to the default when unset or zero.
    #[must_use]
    pub fn period(&self) -> u32 {
        self.period.filter(|p| *p > 0).unwrap_or(DEFAULT_PERIOD_SECS)
    }
}

/// One threshold entry of an alarm group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Threshold {
    /// A bare success-rate value.
    Scalar(f64),
    /// A value with its own evaluation window.
    Detailed(ThresholdSpec),
}

impl Threshold {
    /// Normalizes to the detailed form.
    #[must_use]
    pub const fn normalize(&self) -> ThresholdSpec {
        match self {
            Self::Scalar(value) => ThresholdSpec::new(*value),
            Self::Detailed(spec) => *spec,
        }
    }

    /// The breach value of this threshold.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.normalize().value
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<ThresholdSpec> for Threshold {
    fn from(spec: ThresholdSpec) -> Self {
        Self::Detailed(spec)
    }
}

impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Scalar(f64),
            Detailed(ThresholdSpec),
        }

        match Raw::deserialize(deserializer) {
            Ok(Raw::Scalar(value)) => Ok(Self::Scalar(value)),
            Ok(Raw::Detailed(spec)) => Ok(Self::Detailed(spec)),
            Err(_) => Err(D::Error::custom(
                "threshold must be a number or an object with a numeric `value`",
            )),
        }
    }
}

/// One alarm group: a family of alarms over one API, differing by threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmSpec {
    /// API Gateway name the alarms watch.
    #[serde(alias = "apigw")]
    pub api_name: String,
    /// SNS topic name notified on ALARM and OK transitions.
    pub topic: String,
    /// Display name prefix for the generated alarms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Missing-data policy, uniform or per threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treat_missing_data: Option<MissingDataPolicy>,
    /// One alarm is generated per entry, in order.
    pub thresholds: Vec<Threshold>,
}

impl AlarmSpec {
    /// Creates an alarm group with required fields.
    pub fn new<I, T>(api_name: impl Into<String>, topic: impl Into<String>, thresholds: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Threshold>,
    {
        Self {
            api_name: api_name.into(),
            topic: topic.into(),
            name: None,
            treat_missing_data: None,
            thresholds: thresholds.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the alarm display name prefix.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the missing-data policy.
    #[must_use]
    pub fn with_treat_missing_data(mut self, policy: MissingDataPolicy) -> Self {
        self.treat_missing_data = Some(policy);
        self
    }

    /// Checks the fields the builder cannot work without.
    ///
    /// # Errors
    ///
    /// Returns `AlarmError::MissingField` if `apiName` is blank.
    pub fn validate(&self) -> Result<()> {
        if self.api_name.trim().is_empty() {
            return Err(AlarmError::MissingField {
                field: "apiName".to_string(),
            });
        }
        Ok(())
    }

    /// Resolves the missing-data policy for the threshold at `index`.
    #[must_use]
    pub fn treat_missing_data_for(&self, index: usize) -> Option<TreatMissingData> {
        self.treat_missing_data
            .as_ref()
            .and_then(|policy| policy.resolve(index))
    }
}
