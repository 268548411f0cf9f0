//! Alarm resource synthesis.
//!
//! [`AlarmResourceBuilder`] turns one [`AlarmSpec`] into one
//! `AWS::CloudWatch::Alarm` resource per threshold. Each alarm watches the
//! success rate of an API Gateway stage, derived with metric math from the
//! `5XXError` and `Count` metrics:
//!
//! ```text
//! e1 = 100 - 100 * (m1 / m2)      m1 = Sum(5XXError)   m2 = Sum(Count)
//! ```
//!
//! The alarm fires when `e1` drops to or below the threshold and notifies
//! the same SNS topic on both ALARM and OK transitions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::arn::{AccountRef, TopicArn};
use crate::error::{AlarmError, Result};
use crate::types::{AlarmSpec, ThresholdSpec, TreatMissingData};

/// CloudFormation type of every generated resource.
pub const ALARM_RESOURCE_TYPE: &str = "AWS::CloudWatch::Alarm";

/// Description attached to every generated alarm.
pub const ALARM_DESCRIPTION: &str = "Triggers an alarm if availability drops below 99.9%";

/// Metric namespace of API Gateway.
pub const API_GATEWAY_NAMESPACE: &str = "AWS/ApiGateway";

/// Success-rate expression over the error (`m1`) and request (`m2`) sums.
pub const SUCCESS_RATE_EXPRESSION: &str = "100-100*(m1/m2)";

/// Logical IDs only keep ASCII alphanumerics of the API name.
static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-zA-Z]").unwrap_or_else(|_| unreachable!()));

/// Formats a threshold value the way it appears in IDs and names.
///
/// Whole numbers carry no fractional part (`95`, not `95.0`).
#[must_use]
pub fn format_value(value: f64) -> String {
    format!("{value}")
}

/// Computes the logical ID of the alarm for `api_name` at `value`.
#[must_use]
pub fn logical_id(api_name: &str, value: f64) -> String {
    let stripped = NON_ALPHANUMERIC.replace_all(api_name, "");
    format!("{stripped}MessageAlarm{}", format_value(value))
}

/// Comparison operator of a success-rate alarm, as CloudWatch spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonOperator {
    /// Metric <= threshold.
    LessThanOrEqualToThreshold,
}

/// Values of the `ApiName` and `Stage` metric dimensions.
///
/// The defaults are host variables resolved by the deployment framework when
/// it renders the final template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDimensions {
    /// Value of the `ApiName` dimension.
    pub api_name: String,
    /// Value of the `Stage` dimension.
    pub stage: String,
}

impl MetricDimensions {
    /// Creates explicit dimension values.
    pub fn new(api_name: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            api_name: api_name.into(),
            stage: stage.into(),
        }
    }

    fn to_dimensions(&self) -> Vec<Dimension> {
        vec![
            Dimension {
                name: "ApiName".to_string(),
                value: self.api_name.clone(),
            },
            Dimension {
                name: "Stage".to_string(),
                value: self.stage.clone(),
            },
        ]
    }
}

impl Default for MetricDimensions {
    fn default() -> Self {
        Self::new("${self:provider.stage}-${self:service}", "${self:provider.stage}")
    }
}

/// A metric dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Dimension value.
    pub value: String,
}

/// A raw CloudWatch metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metric {
    /// Metric name within the namespace.
    pub metric_name: String,
    /// Metric namespace.
    pub namespace: String,
    /// Dimensions selecting the series.
    pub dimensions: Vec<Dimension>,
}

/// A statistic over a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricStat {
    /// The metric.
    pub metric: Metric,
    /// Statistic name.
    pub stat: String,
    /// Aggregation period in seconds.
    pub period: u32,
}

/// One entry of an alarm's `Metrics` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDataQuery {
    /// Identifier used by expressions.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Metric-math expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Raw metric statistic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_stat: Option<MetricStat>,
    /// Whether this query's series is the one evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_data: Option<bool>,
}

impl MetricDataQuery {
    fn expression(id: &str, label: &str, expression: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            expression: Some(expression.to_string()),
            metric_stat: None,
            return_data: None,
        }
    }

    fn api_gateway_sum(
        id: &str,
        label: &str,
        metric_name: &str,
        dimensions: &MetricDimensions,
        period: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            expression: None,
            metric_stat: Some(MetricStat {
                metric: Metric {
                    metric_name: metric_name.to_string(),
                    namespace: API_GATEWAY_NAMESPACE.to_string(),
                    dimensions: dimensions.to_dimensions(),
                },
                stat: "Sum".to_string(),
                period,
            }),
            return_data: Some(false),
        }
    }
}

/// Properties of an `AWS::CloudWatch::Alarm` resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmProperties {
    /// Human-readable description.
    pub alarm_description: String,
    /// Metric-math queries.
    pub metrics: Vec<MetricDataQuery>,
    /// Number of periods evaluated.
    pub evaluation_periods: u32,
    /// Breach value.
    pub threshold: f64,
    /// How the success rate is compared against the threshold.
    pub comparison_operator: ComparisonOperator,
    /// Notified on transition to ALARM.
    pub alarm_actions: Vec<TopicArn>,
    /// Notified on transition to OK.
    #[serde(rename = "OKActions")]
    pub ok_actions: Vec<TopicArn>,
    /// Display name, set only for named groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_name: Option<String>,
    /// Missing-data policy, set only when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treat_missing_data: Option<TreatMissingData>,
}

/// A CloudFormation alarm resource body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlarmResourceBody {
    /// Always [`ALARM_RESOURCE_TYPE`].
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Alarm properties.
    #[serde(rename = "Properties")]
    pub properties: AlarmProperties,
}

/// A named alarm resource, ready to merge into a template.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmResource {
    /// Key of the resource within `Resources`.
    pub logical_id: String,
    /// The resource definition.
    pub body: AlarmResourceBody,
}

impl AlarmResource {
    /// Renders the resource as a single-entry fragment `{ logicalId: body }`.
    ///
    /// # Errors
    ///
    /// Returns `AlarmError::SerializationError` if the body cannot be encoded.
    pub fn to_fragment(&self) -> Result<Value> {
        let mut fragment = serde_json::Map::new();
        fragment.insert(self.logical_id.clone(), serde_json::to_value(&self.body)?);
        Ok(Value::Object(fragment))
    }
}

/// Combines resources into one `logicalId -> body` mapping.
///
/// A later resource with the same logical ID replaces an earlier one.
///
/// # Errors
///
/// Returns `AlarmError::SerializationError` if a body cannot be encoded.
pub fn fragments_to_map(resources: &[AlarmResource]) -> Result<serde_json::Map<String, Value>> {
    let mut map = serde_json::Map::new();
    for resource in resources {
        map.insert(resource.logical_id.clone(), serde_json::to_value(&resource.body)?);
    }
    Ok(map)
}

/// Builds success-rate alarms for one deployment region.
#[derive(Debug, Clone)]
pub struct AlarmResourceBuilder {
    region: String,
    account: AccountRef,
    dimensions: MetricDimensions,
}

impl AlarmResourceBuilder {
    /// Creates a builder for `region` with a deferred account and default
    /// dimensions.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            account: AccountRef::Deferred,
            dimensions: MetricDimensions::default(),
        }
    }

    /// Sets the account owning the notification topics.
    #[must_use]
    pub fn with_account(mut self, account: AccountRef) -> Self {
        self.account = account;
        self
    }

    /// Sets the metric dimension values.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: MetricDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Returns the deployment region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Builds one alarm per threshold of `spec`, in threshold order.
    ///
    /// An empty threshold list yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns `AlarmError::MissingField` if `apiName` is blank, or
    /// `AlarmError::InvalidThreshold` if a threshold value is not finite.
    pub fn build(&self, spec: &AlarmSpec) -> Result<Vec<AlarmResource>> {
        spec.validate()?;

        let topic = TopicArn::new(&self.region, &spec.topic).with_account(self.account.clone());

        spec.thresholds
            .iter()
            .enumerate()
            .map(|(index, threshold)| {
                let threshold = threshold.normalize();
                if !threshold.value.is_finite() {
                    return Err(AlarmError::InvalidThreshold {
                        index,
                        reason: format!("value must be a finite number, got {}", threshold.value),
                    });
                }
                Ok(self.build_one(spec, index, &threshold, &topic))
            })
            .collect()
    }

    fn build_one(
        &self,
        spec: &AlarmSpec,
        index: usize,
        threshold: &ThresholdSpec,
        topic: &TopicArn,
    ) -> AlarmResource {
        let logical_id = logical_id(&spec.api_name, threshold.value);
        let period = threshold.period();

        let alarm_name = spec
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| format!("{name}-{}-{}", spec.api_name, format_value(threshold.value)));

        let treat_missing_data = spec.treat_missing_data_for(index);
        if spec.treat_missing_data.is_some() && treat_missing_data.is_none() {
            debug!(logical_id = %logical_id, index, "no valid missing-data policy for threshold, leaving unset");
        }

        debug!(logical_id = %logical_id, threshold = threshold.value, period, "built success-rate alarm");

        AlarmResource {
            logical_id,
            body: AlarmResourceBody {
                resource_type: ALARM_RESOURCE_TYPE.to_string(),
                properties: AlarmProperties {
                    alarm_description: ALARM_DESCRIPTION.to_string(),
                    metrics: vec![
                        MetricDataQuery::expression("e1", "Success Rate", SUCCESS_RATE_EXPRESSION),
                        MetricDataQuery::api_gateway_sum(
                            "m1",
                            "5XX-error-rate",
                            "5XXError",
                            &self.dimensions,
                            period,
                        ),
                        MetricDataQuery::api_gateway_sum(
                            "m2",
                            "count",
                            "Count",
                            &self.dimensions,
                            period,
                        ),
                    ],
                    evaluation_periods: threshold.evaluation_periods(),
                    threshold: threshold.value,
                    comparison_operator: ComparisonOperator::LessThanOrEqualToThreshold,
                    alarm_actions: vec![topic.clone()],
                    ok_actions: vec![topic.clone()],
                    alarm_name,
                    treat_missing_data,
                },
            },
        }
    }
}

/// Builds the alarms of `spec` for `region` with default settings.
///
/// # Errors
///
/// See [`AlarmResourceBuilder::build`].
pub fn build(spec: &AlarmSpec, region: &str) -> Result<Vec<AlarmResource>> {
    AlarmResourceBuilder::new(region).build(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MissingDataPolicy, Threshold};
    use serde_json::json;

    fn orders_spec() -> AlarmSpec {
        AlarmSpec::new("OrdersApi", "alerts", [99.9])
    }

    fn properties(resource: &AlarmResource) -> Value {
        serde_json::to_value(&resource.body).unwrap()["Properties"].clone()
    }

    mod logical_id_tests {
        use super::*;
        use test_case::test_case;

        #[test_case("my-api_42", 99.0, "myapi42MessageAlarm99" ; "strips separators")]
        #[test_case("OrdersApi", 99.9, "OrdersApiMessageAlarm99.9" ; "fractional value")]
        #[test_case("Orders Api!", 95.0, "OrdersApiMessageAlarm95" ; "whole value")]
        #[test_case("ümlaut-api", 90.0, "mlautapiMessageAlarm90" ; "non ascii dropped")]
        #[test_case("---", 90.0, "MessageAlarm90" ; "nothing left")]
        fn formats(api_name: &str, value: f64, expected: &str) {
            assert_eq!(logical_id(api_name, value), expected);
        }

        #[test]
        fn preserves_case() {
            assert_ne!(logical_id("Orders", 99.0), logical_id("orders", 99.0));
        }
    }

    mod build_tests {
        use super::*;

        #[test]
        fn empty_name_leaves_alarm_name_unset() {
            let spec = AlarmSpec::new("OrdersApi", "alerts", [95.0]).with_name("");
            let resources = build(&spec, "us-east-1").unwrap();

            assert!(resources[0].body.properties.alarm_name.is_none());
            assert!(properties(&resources[0]).get("AlarmName").is_none());
        }

        #[test]
        fn orders_api_example() {
            let resources = build(&orders_spec(), "us-east-1").unwrap();
            assert_eq!(resources.len(), 1);

            let resource = &resources[0];
            assert_eq!(resource.logical_id, "OrdersApiMessageAlarm99.9");
            assert_eq!(resource.body.resource_type, "AWS::CloudWatch::Alarm");

            let props = properties(resource);
            assert_eq!(props["ComparisonOperator"], "LessThanOrEqualToThreshold");
            assert_eq!(props["EvaluationPeriods"], 1);
            assert_eq!(props["Threshold"], 99.9);
            assert_eq!(props["AlarmDescription"], ALARM_DESCRIPTION);

            for key in ["AlarmActions", "OKActions"] {
                let rendered = props[key].to_string();
                assert!(rendered.contains("us-east-1"), "{key}: {rendered}");
                assert!(rendered.contains("alerts"), "{key}: {rendered}");
            }
            assert_eq!(props["AlarmActions"], props["OKActions"]);
        }

        #[test]
        fn metric_math_shape() {
            let resources = build(&orders_spec(), "us-east-1").unwrap();
            let props = properties(&resources[0]);

            assert_eq!(
                props["Metrics"][0],
                json!({"Id": "e1", "Label": "Success Rate", "Expression": "100-100*(m1/m2)"})
            );

            let dimensions = json!([
                {"Name": "ApiName", "Value": "${self:provider.stage}-${self:service}"},
                {"Name": "Stage", "Value": "${self:provider.stage}"}
            ]);
            assert_eq!(
                props["Metrics"][1],
                json!({
                    "Id": "m1",
                    "Label": "5XX-error-rate",
                    "MetricStat": {
                        "Metric": {
                            "MetricName": "5XXError",
                            "Namespace": "AWS/ApiGateway",
                            "Dimensions": dimensions
                        },
                        "Stat": "Sum",
                        "Period": 900
                    },
                    "ReturnData": false
                })
            );
            assert_eq!(props["Metrics"][2]["Id"], "m2");
            assert_eq!(props["Metrics"][2]["Label"], "count");
            assert_eq!(props["Metrics"][2]["MetricStat"]["Metric"]["MetricName"], "Count");
            assert_eq!(props["Metrics"][2]["MetricStat"]["Metric"]["Dimensions"], dimensions);
            assert_eq!(props["Metrics"][2]["ReturnData"], false);
        }

        #[test]
        fn detailed_threshold_window() {
            let spec = AlarmSpec::new(
                "OrdersApi",
                "alerts",
                [Threshold::Detailed(
                    ThresholdSpec::new(97.5)
                        .with_evaluation_periods(3)
                        .with_period(300),
                )],
            );
            let resources = build(&spec, "us-east-1").unwrap();
            let props = properties(&resources[0]);

            assert_eq!(props["EvaluationPeriods"], 3);
            assert_eq!(props["Metrics"][1]["MetricStat"]["Period"], 300);
            assert_eq!(props["Metrics"][2]["MetricStat"]["Period"], 300);
        }

        #[test]
        fn zero_window_builds_with_defaults() {
            let spec = AlarmSpec::new(
                "OrdersApi",
                "alerts",
                [Threshold::Detailed(
                    ThresholdSpec::new(95.0)
                        .with_evaluation_periods(0)
                        .with_period(0),
                )],
            );
            let resources = build(&spec, "us-east-1").unwrap();
            let props = properties(&resources[0]);

            assert_eq!(props["EvaluationPeriods"], 1);
            assert_eq!(props["Metrics"][1]["MetricStat"]["Period"], 900);
            assert_eq!(props["Metrics"][2]["MetricStat"]["Period"], 900);
        }

        #[test]
        fn alarm_name_when_named() {
            let spec = AlarmSpec::new("OrdersApi", "alerts", [95.0]).with_name("Checkout");
            let resources = build(&spec, "us-east-1").unwrap();
            assert_eq!(
                resources[0].body.properties.alarm_name.as_deref(),
                Some("Checkout-OrdersApi-95")
            );
        }

        #[test]
        fn alarm_name_keeps_raw_api_name() {
            let spec = AlarmSpec::new("orders-api", "alerts", [99.5]).with_name("Checkout");
            let resources = build(&spec, "us-east-1").unwrap();
            assert_eq!(resources[0].logical_id, "ordersapiMessageAlarm99.5");
            assert_eq!(
                resources[0].body.properties.alarm_name.as_deref(),
                Some("Checkout-orders-api-99.5")
            );
        }

        #[test]
        fn no_alarm_name_key_when_unnamed() {
            let resources = build(&orders_spec(), "us-east-1").unwrap();
            let props = properties(&resources[0]);
            assert!(props.get("AlarmName").is_none());
            assert!(props.get("TreatMissingData").is_none());
        }

        #[test]
        fn per_threshold_missing_data() {
            let spec = AlarmSpec::new("OrdersApi", "alerts", [99.9, 95.0])
                .with_treat_missing_data(MissingDataPolicy::per_threshold(["breaching", "bogus"]));
            let resources = build(&spec, "us-east-1").unwrap();

            assert_eq!(properties(&resources[0])["TreatMissingData"], "breaching");
            assert!(properties(&resources[1]).get("TreatMissingData").is_none());
        }

        #[test]
        fn short_missing_data_list() {
            let spec = AlarmSpec::new("OrdersApi", "alerts", [99.9, 99.0, 95.0])
                .with_treat_missing_data(MissingDataPolicy::per_threshold(["notBreaching"]));
            let resources = build(&spec, "us-east-1").unwrap();

            assert_eq!(
                resources[0].body.properties.treat_missing_data,
                Some(TreatMissingData::NotBreaching)
            );
            assert_eq!(resources[1].body.properties.treat_missing_data, None);
            assert_eq!(resources[2].body.properties.treat_missing_data, None);
        }

        #[test]
        fn uniform_missing_data() {
            let spec = AlarmSpec::new("OrdersApi", "alerts", [99.9, 95.0])
                .with_treat_missing_data(MissingDataPolicy::uniform("ignore"));
            let resources = build(&spec, "us-east-1").unwrap();
            for resource in &resources {
                assert_eq!(properties(resource)["TreatMissingData"], "ignore");
            }
        }

        #[test]
        fn empty_thresholds() {
            let spec = AlarmSpec::new("OrdersApi", "alerts", Vec::<f64>::new());
            let resources = build(&spec, "us-east-1").unwrap();
            assert!(resources.is_empty());
        }

        #[test]
        fn order_is_preserved() {
            let spec = AlarmSpec::new("OrdersApi", "alerts", [90.0, 99.0, 95.0]);
            let ids: Vec<_> = build(&spec, "us-east-1")
                .unwrap()
                .into_iter()
                .map(|r| r.logical_id)
                .collect();
            assert_eq!(
                ids,
                [
                    "OrdersApiMessageAlarm90",
                    "OrdersApiMessageAlarm99",
                    "OrdersApiMessageAlarm95"
                ]
            );
        }

        #[test]
        fn blank_api_name_fails() {
            let spec = AlarmSpec::new("", "alerts", [99.0]);
            assert!(matches!(
                build(&spec, "us-east-1"),
                Err(AlarmError::MissingField { .. })
            ));
        }

        #[test]
        fn non_finite_threshold_fails() {
            let spec = AlarmSpec::new("OrdersApi", "alerts", [99.0, f64::NAN]);
            match build(&spec, "us-east-1") {
                Err(AlarmError::InvalidThreshold { index, .. }) => assert_eq!(index, 1),
                other => panic!("expected InvalidThreshold, got {other:?}"),
            }
        }

        #[test]
        fn empty_region_and_topic_flow_into_arn() {
            let spec = AlarmSpec::new("OrdersApi", "", [99.0]);
            let resources = build(&spec, "").unwrap();
            assert_eq!(
                properties(&resources[0])["AlarmActions"][0]["Fn::Join"][1][0],
                "arn:aws:sns::"
            );
        }

        #[test]
        fn spec_is_not_mutated() {
            let spec = AlarmSpec::new("OrdersApi", "alerts", [99.0, 95.0])
                .with_treat_missing_data(MissingDataPolicy::uniform("bogus"));
            let before = spec.clone();
            let _ = build(&spec, "us-east-1").unwrap();
            assert_eq!(spec, before);
        }
    }

    mod builder_option_tests {
        use super::*;

        #[test]
        fn literal_account() {
            let resources = AlarmResourceBuilder::new("eu-west-1")
                .with_account(AccountRef::Literal("123456789012".to_string()))
                .build(&orders_spec())
                .unwrap();
            assert_eq!(
                properties(&resources[0])["AlarmActions"][0],
                "arn:aws:sns:eu-west-1:123456789012:alerts"
            );
        }

        #[test]
        fn custom_dimensions() {
            let resources = AlarmResourceBuilder::new("us-east-1")
                .with_dimensions(MetricDimensions::new("prod-orders", "prod"))
                .build(&orders_spec())
                .unwrap();
            assert_eq!(
                properties(&resources[0])["Metrics"][1]["MetricStat"]["Metric"]["Dimensions"],
                json!([
                    {"Name": "ApiName", "Value": "prod-orders"},
                    {"Name": "Stage", "Value": "prod"}
                ])
            );
        }

        #[test]
        fn region_accessor() {
            assert_eq!(AlarmResourceBuilder::new("ap-south-1").region(), "ap-south-1");
        }
    }

    mod fragment_tests {
        use super::*;

        #[test]
        fn single_entry_fragment() {
            let resources = build(&orders_spec(), "us-east-1").unwrap();
            let fragment = resources[0].to_fragment().unwrap();
            let object = fragment.as_object().unwrap();
            assert_eq!(object.len(), 1);
            assert_eq!(
                object["OrdersApiMessageAlarm99.9"]["Type"],
                "AWS::CloudWatch::Alarm"
            );
        }

        #[test]
        fn later_duplicate_wins() {
            let first = AlarmSpec::new("OrdersApi", "first", [99.0]);
            let second = AlarmSpec::new("Orders-Api", "second", [99.0]);
            let mut resources = build(&first, "us-east-1").unwrap();
            resources.extend(build(&second, "us-east-1").unwrap());

            let map = fragments_to_map(&resources).unwrap();
            assert_eq!(map.len(), 1);
            let rendered = map["OrdersApiMessageAlarm99"]["Properties"]["AlarmActions"].to_string();
            assert!(rendered.contains("second"));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn distinct_values() -> impl Strategy<Value = Vec<f64>> {
            prop::collection::btree_set(0u32..10_000, 0..8)
                .prop_map(|set| set.into_iter().map(|v| f64::from(v) / 100.0).collect())
        }

        proptest! {
            #[test]
            fn one_resource_per_threshold(values in distinct_values()) {
                let spec = AlarmSpec::new("OrdersApi", "alerts", values.clone());
                let resources = build(&spec, "us-east-1").unwrap();
                prop_assert_eq!(resources.len(), values.len());
            }

            #[test]
            fn distinct_values_give_distinct_ids(values in distinct_values()) {
                let spec = AlarmSpec::new("OrdersApi", "alerts", values.clone());
                let resources = build(&spec, "us-east-1").unwrap();
                let ids: std::collections::HashSet<_> =
                    resources.iter().map(|r| r.logical_id.clone()).collect();
                prop_assert_eq!(ids.len(), values.len());
            }

            #[test]
            fn build_is_idempotent(values in distinct_values(), api in "[a-zA-Z0-9_ -]{1,20}") {
                prop_assume!(!api.trim().is_empty());
                let spec = AlarmSpec::new(api, "alerts", values)
                    .with_name("Checkout")
                    .with_treat_missing_data(MissingDataPolicy::per_threshold(["ignore", "x"]));
                let first = fragments_to_map(&build(&spec, "us-east-1").unwrap()).unwrap();
                let second = fragments_to_map(&build(&spec, "us-east-1").unwrap()).unwrap();
                prop_assert_eq!(
                    serde_json::to_string(&first).unwrap(),
                    serde_json::to_string(&second).unwrap()
                );
            }

            #[test]
            fn logical_id_is_alphanumeric_prefix(api in "\\PC{0,24}", value in 0u32..1000) {
                let id = logical_id(&api, f64::from(value));
                let prefix = id.split("MessageAlarm").next().unwrap_or_default();
                prop_assert!(prefix.chars().all(|c| c.is_ascii_alphanumeric()));
                let suffix = format!("MessageAlarm{value}");
                prop_assert!(id.ends_with(&suffix));
            }
        }
    }
}
