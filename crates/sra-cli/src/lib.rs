//! # sra-cli
//!
//! Command-line packaging of API Gateway success-rate alarms.
//!
//! Provides commands for:
//! - Rendering the alarm resources declared by a service document
//! - Merging those resources into a compiled CloudFormation template
//!
//! # Architecture
//!
//! The CLI stands in for the deployment framework's packaging hook. It reads
//! `custom.SuccessRateAlarm` from the service document and hands it to
//! [`sra_alarms::Packager`].
//!
//! ```text
//! ┌────────────────┐   ServiceConfig   ┌────────────┐   Resources   ┌──────────┐
//! │ serverless.yml │──────────────────►│  Packager  │──────────────►│ template │
//! └────────────────┘                   └────────────┘               └──────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format, PackageArgs, RenderArgs};
pub use error::CliError;
pub use output::OutputFormat;
