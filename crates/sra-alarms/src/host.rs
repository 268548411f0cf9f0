//! Host adapter: service configuration in, merged template out.
//!
//! The deployment framework declares alarm groups under
//! `custom.SuccessRateAlarm` of its service document. [`Packager`] builds
//! every declared group for the deployment region and merges the resulting
//! resources into the compiled template's `Resources` collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::builder::{AlarmResource, AlarmResourceBuilder, MetricDimensions};
use crate::error::{AlarmError, Result};
use crate::types::AlarmSpec;

/// Region used when neither the caller nor the provider names one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Provider settings read by the adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Deployment region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Deployment stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

/// The `custom` section of a service document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomSection {
    /// Declared alarm groups.
    #[serde(
        rename = "SuccessRateAlarm",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub success_rate_alarm: Option<Vec<AlarmSpec>>,
}

/// The parts of a service document the adapter reads. Other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Custom plugin settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomSection>,
}

impl ServiceConfig {
    /// Creates a config declaring `groups`.
    #[must_use]
    pub fn with_groups(groups: Vec<AlarmSpec>) -> Self {
        Self {
            provider: ProviderConfig::default(),
            custom: Some(CustomSection {
                success_rate_alarm: Some(groups),
            }),
        }
    }

    /// Parses a YAML service document.
    ///
    /// # Errors
    ///
    /// Returns `AlarmError::Config` if the document is malformed.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| AlarmError::Config {
            reason: e.to_string(),
        })
    }

    /// Parses a JSON service document.
    ///
    /// # Errors
    ///
    /// Returns `AlarmError::Config` if the document is malformed.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| AlarmError::Config {
            reason: e.to_string(),
        })
    }

    /// Declared alarm groups; empty when the section is absent.
    #[must_use]
    pub fn alarm_groups(&self) -> &[AlarmSpec] {
        self.custom
            .as_ref()
            .and_then(|custom| custom.success_rate_alarm.as_deref())
            .unwrap_or_default()
    }

    /// Resolves the deployment region: `override_region`, then the
    /// provider's region, then [`DEFAULT_REGION`].
    #[must_use]
    pub fn region(&self, override_region: Option<&str>) -> String {
        override_region
            .or(self.provider.region.as_deref())
            .unwrap_or(DEFAULT_REGION)
            .to_string()
    }
}

/// Builds every alarm group of `config` for `region`, in declaration order.
///
/// # Errors
///
/// Returns `AlarmError::Group` wrapping the first group that fails to build.
pub fn build_all(config: &ServiceConfig, region: &str) -> Result<Vec<AlarmResource>> {
    build_groups(config.alarm_groups(), &AlarmResourceBuilder::new(region))
}

fn build_groups(
    groups: &[AlarmSpec],
    builder: &AlarmResourceBuilder,
) -> Result<Vec<AlarmResource>> {
    let mut resources = Vec::new();
    for (index, group) in groups.iter().enumerate() {
        let built = builder.build(group).map_err(|e| AlarmError::Group {
            index,
            source: Box::new(e),
        })?;
        debug!(
            group = index,
            api_name = %group.api_name,
            alarms = built.len(),
            "built alarm group"
        );
        resources.extend(built);
    }
    Ok(resources)
}

/// Deep-merges `source` into `target`.
///
/// Objects merge key by key, arrays merge element by element, and any other
/// value replaces what was there.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                deep_merge(target.entry(key).or_insert(Value::Null), value);
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for (index, value) in source.into_iter().enumerate() {
                match target.get_mut(index) {
                    Some(existing) => deep_merge(existing, value),
                    None => target.push(value),
                }
            }
        }
        (target, source) => *target = source,
    }
}

/// Merges `resources` into the `Resources` collection of `template`.
///
/// The collection is created when missing.
///
/// # Errors
///
/// Returns `AlarmError::Template` if the template or its `Resources` is not
/// an object.
pub fn merge_resources(template: &mut Value, resources: &[AlarmResource]) -> Result<()> {
    let root = template.as_object_mut().ok_or_else(|| AlarmError::Template {
        reason: "template root must be an object".to_string(),
    })?;
    let collection = root
        .entry("Resources")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| AlarmError::Template {
            reason: "Resources must be an object".to_string(),
        })?;

    for resource in resources {
        let body = serde_json::to_value(&resource.body)?;
        deep_merge(
            collection
                .entry(resource.logical_id.clone())
                .or_insert(Value::Null),
            body,
        );
    }
    Ok(())
}

/// Outcome of a packaging pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    /// Region the alarms were built for.
    pub region: String,
    /// Number of alarm groups processed.
    pub groups: usize,
    /// Logical IDs merged into the template, in order.
    pub logical_ids: Vec<String>,
}

/// Packages the alarm groups of a service into its template.
#[derive(Debug, Clone)]
pub struct Packager {
    config: ServiceConfig,
    region: Option<String>,
    dimensions: MetricDimensions,
}

impl Packager {
    /// Creates a packager for `config`.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            region: None,
            dimensions: MetricDimensions::default(),
        }
    }

    /// Overrides the deployment region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the metric dimension values.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: MetricDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Returns the effective deployment region.
    #[must_use]
    pub fn region(&self) -> String {
        self.config.region(self.region.as_deref())
    }

    /// Builds the resources of every declared group.
    ///
    /// # Errors
    ///
    /// Returns `AlarmError::Group` wrapping the first group that fails.
    pub fn resources(&self) -> Result<Vec<AlarmResource>> {
        let builder =
            AlarmResourceBuilder::new(self.region()).with_dimensions(self.dimensions.clone());
        build_groups(self.config.alarm_groups(), &builder)
    }

    /// Builds every declared group and merges the result into `template`.
    ///
    /// Nothing is merged unless every group builds. A service without alarm
    /// groups leaves the template untouched.
    ///
    /// # Errors
    ///
    /// Returns `AlarmError::Group` if a group fails to build, or
    /// `AlarmError::Template` if the template cannot accept resources.
    pub fn package(&self, template: &mut Value) -> Result<PackageSummary> {
        let region = self.region();
        let groups = self.config.alarm_groups().len();

        if groups == 0 {
            debug!("no success-rate alarm groups declared");
            return Ok(PackageSummary {
                region,
                groups,
                logical_ids: Vec::new(),
            });
        }

        let resources = self.resources()?;
        merge_resources(template, &resources)?;

        let logical_ids: Vec<String> = resources.into_iter().map(|r| r.logical_id).collect();
        info!(
            region = %region,
            groups,
            alarms = logical_ids.len(),
            "merged success-rate alarms into template"
        );

        Ok(PackageSummary {
            region,
            groups,
            logical_ids,
        })
    }
}
