//! `updateservice-connector` is an async HTTP client for the bibliographic
//! update service.
//!
//! One generic [`Connector`] performs a typed POST with a fixed retry policy
//! and per-call timing. Typed connectors wrap it for each remote operation:
//! - [`BuildConnector::build_record`]
//! - [`ClassificationCheckConnector::classification_check`]
//! - [`DoubleRecordCheckConnector::double_record_check`]
//! - [`UpdateConnector::update_record`] and [`UpdateConnector::get_schemas`]

mod codec;
mod connector;
pub mod dto;
pub mod endpoint;
mod error;
mod options;
mod retry;
mod services;
mod timing;

pub use codec::Codec;
pub use connector::Connector;
pub use endpoint::Endpoint;
pub use error::ConnectorError;
pub use options::{ConnectorConfig, ConnectorOptions};
pub use retry::RetryPolicy;
pub use services::{
    BuildConnector, ClassificationCheckConnector, DoubleRecordCheckConnector, UpdateConnector,
};
pub use timing::{TimingLogLevel, TimingSink, TracingTimingSink};

pub type Result<T> = std::result::Result<T, ConnectorError>;
