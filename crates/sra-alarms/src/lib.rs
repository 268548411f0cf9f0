//! CloudFormation success-rate alarms for API Gateway stages.
//!
//! `sra-alarms` turns a small declarative alarm group (API name, SNS topic,
//! thresholds, naming and missing-data policy) into `AWS::CloudWatch::Alarm`
//! resources ready to merge into a deployment template.
//!
//! # Features
//!
//! - **Metric math**: Each alarm watches `100-100*(5XXError/Count)` over the stage
//! - **One alarm per threshold**: Thresholds may carry their own evaluation window
//! - **Deferred account**: Topic ARNs reference `AWS::AccountId` instead of a literal
//! - **Host adapter**: Reads `custom.SuccessRateAlarm` and merges into `Resources`
//!
//! # Example
//!
//! ```rust
//! use sra_alarms::{AlarmSpec, MissingDataPolicy, build};
//!
//! let spec = AlarmSpec::new("OrdersApi", "alerts", [99.9, 95.0])
//!     .with_name("Checkout")
//!     .with_treat_missing_data(MissingDataPolicy::per_threshold(["breaching"]));
//!
//! let alarms = build(&spec, "us-east-1")?;
//! assert_eq!(alarms.len(), 2);
//! assert_eq!(alarms[0].logical_id, "OrdersApiMessageAlarm99.9");
//! assert_eq!(
//!     alarms[1].body.properties.alarm_name.as_deref(),
//!     Some("Checkout-OrdersApi-95")
//! );
//! # Ok::<(), sra_alarms::AlarmError>(())
//! ```
//!
//! # Packaging a service
//!
//! ```rust
//! use sra_alarms::{Packager, ServiceConfig};
//! use serde_json::json;
//!
//! let config = ServiceConfig::from_yaml_str(
//!     "provider:\n  region: eu-west-1\ncustom:\n  SuccessRateAlarm:\n    - apigw: orders\n      topic: alerts\n      thresholds: [99]\n",
//! )?;
//!
//! let mut template = json!({ "Resources": {} });
//! let summary = Packager::new(config).package(&mut template)?;
//!
//! assert_eq!(summary.logical_ids, ["ordersMessageAlarm99"]);
//! assert_eq!(
//!     template["Resources"]["ordersMessageAlarm99"]["Type"],
//!     "AWS::CloudWatch::Alarm"
//! );
//! # Ok::<(), sra_alarms::AlarmError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod arn;
pub mod builder;
pub mod error;
pub mod host;
pub mod types;

// Re-export main types at crate root
pub use arn::{AccountRef, TopicArn};
pub use builder::{
    AlarmProperties, AlarmResource, AlarmResourceBody, AlarmResourceBuilder, ComparisonOperator,
    MetricDimensions, build, fragments_to_map, logical_id,
};
pub use error::{AlarmError, Result};
pub use host::{
    PackageSummary, Packager, ServiceConfig, build_all, deep_merge, merge_resources,
};
pub use types::{AlarmSpec, MissingDataPolicy, Threshold, ThresholdSpec, TreatMissingData};
