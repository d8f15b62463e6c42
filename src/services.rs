//! Typed connectors, one per remote update service operation.
//!
//! Each wraps a [`Connector`] bound to its endpoint(s). They are thin: all
//! retry, timing and error behavior lives in [`Connector::execute`].

use std::sync::Arc;

use crate::{
    dto::{
        BibliographicRecord, BuildRequest, BuildResponse, SchemasRequest, SchemasResponse,
        UpdateRecordResponse, UpdateServiceRequest,
    },
    endpoint, Connector, ConnectorConfig, ConnectorOptions, Result, TimingSink,
};

const UPDATE_SERVICE_URL: &str = "UPDATE_SERVICE_URL";

/// Expands a minimal record into a full catalogue record from a named template.
#[derive(Clone, Debug)]
pub struct BuildConnector {
    connector: Connector,
}

impl BuildConnector {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Connector::new(base_url).map(Self::from_connector)
    }

    pub fn from_connector(connector: Connector) -> Self {
        Self { connector }
    }

    /// Reads `BUILD_SERVICE_URL` and `BUILD_SERVICE_TIMING_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        let config =
            ConnectorConfig::from_env("BUILD_SERVICE_URL", "BUILD_SERVICE_TIMING_LOG_LEVEL")?;
        Connector::from_config(&config).map(Self::from_connector)
    }

    pub fn with_options(self, opts: ConnectorOptions) -> Self {
        Self::from_connector(self.connector.with_options(opts))
    }

    pub fn with_timing_sink(self, sink: Arc<dyn TimingSink>) -> Self {
        Self::from_connector(self.connector.with_timing_sink(sink))
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub async fn build_record(&self, request: &BuildRequest) -> Result<BuildResponse> {
        self.connector.execute(&endpoint::BUILD, request).await
    }

    pub fn close(self) {
        self.connector.close();
    }
}

/// Asks whether a change to a record requires downstream reclassification.
#[derive(Clone, Debug)]
pub struct ClassificationCheckConnector {
    connector: Connector,
}

impl ClassificationCheckConnector {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Connector::new(base_url).map(Self::from_connector)
    }

    pub fn from_connector(connector: Connector) -> Self {
        Self { connector }
    }

    /// Reads `UPDATE_SERVICE_URL` and
    /// `UPDATE_SERVICE_CLASSIFICATION_CHECK_TIMING_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        let config = ConnectorConfig::from_env(
            UPDATE_SERVICE_URL,
            "UPDATE_SERVICE_CLASSIFICATION_CHECK_TIMING_LOG_LEVEL",
        )?;
        Connector::from_config(&config).map(Self::from_connector)
    }

    pub fn with_options(self, opts: ConnectorOptions) -> Self {
        Self::from_connector(self.connector.with_options(opts))
    }

    pub fn with_timing_sink(self, sink: Arc<dyn TimingSink>) -> Self {
        Self::from_connector(self.connector.with_timing_sink(sink))
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub async fn classification_check(
        &self,
        record: &BibliographicRecord,
    ) -> Result<UpdateRecordResponse> {
        self.connector
            .execute(&endpoint::CLASSIFICATION_CHECK, record)
            .await
    }

    pub fn close(self) {
        self.connector.close();
    }
}

/// Asks whether a record duplicates one that is already catalogued.
#[derive(Clone, Debug)]
pub struct DoubleRecordCheckConnector {
    connector: Connector,
}

impl DoubleRecordCheckConnector {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Connector::new(base_url).map(Self::from_connector)
    }

    pub fn from_connector(connector: Connector) -> Self {
        Self { connector }
    }

    /// Reads `UPDATE_SERVICE_URL` and
    /// `UPDATE_SERVICE_DOUBLE_RECORD_CHECK_TIMING_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        let config = ConnectorConfig::from_env(
            UPDATE_SERVICE_URL,
            "UPDATE_SERVICE_DOUBLE_RECORD_CHECK_TIMING_LOG_LEVEL",
        )?;
        Connector::from_config(&config).map(Self::from_connector)
    }

    pub fn with_options(self, opts: ConnectorOptions) -> Self {
        Self::from_connector(self.connector.with_options(opts))
    }

    pub fn with_timing_sink(self, sink: Arc<dyn TimingSink>) -> Self {
        Self::from_connector(self.connector.with_timing_sink(sink))
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub async fn double_record_check(
        &self,
        record: &BibliographicRecord,
    ) -> Result<UpdateRecordResponse> {
        self.connector
            .execute(&endpoint::DOUBLE_RECORD_CHECK, record)
            .await
    }

    pub fn close(self) {
        self.connector.close();
    }
}

/// Submits records for update and lists the templates a library may use.
#[derive(Clone, Debug)]
pub struct UpdateConnector {
    connector: Connector,
}

impl UpdateConnector {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Connector::new(base_url).map(Self::from_connector)
    }

    pub fn from_connector(connector: Connector) -> Self {
        Self { connector }
    }

    /// Reads `UPDATE_SERVICE_URL` and `UPDATE_SERVICE_TIMING_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        let config =
            ConnectorConfig::from_env(UPDATE_SERVICE_URL, "UPDATE_SERVICE_TIMING_LOG_LEVEL")?;
        Connector::from_config(&config).map(Self::from_connector)
    }

    pub fn with_options(self, opts: ConnectorOptions) -> Self {
        Self::from_connector(self.connector.with_options(opts))
    }

    pub fn with_timing_sink(self, sink: Arc<dyn TimingSink>) -> Self {
        Self::from_connector(self.connector.with_timing_sink(sink))
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub async fn update_record(
        &self,
        request: &UpdateServiceRequest,
    ) -> Result<UpdateRecordResponse> {
        self.connector
            .execute(&endpoint::UPDATE_RECORD, request)
            .await
    }

    /// Same as [`UpdateConnector::update_record`], passing the end client's
    /// address on in `X-Forwarded-For`.
    pub async fn update_record_forwarded_for(
        &self,
        request: &UpdateServiceRequest,
        x_forwarded_for: &str,
    ) -> Result<UpdateRecordResponse> {
        self.connector
            .execute_with_headers(
                &endpoint::UPDATE_RECORD,
                request,
                &[("X-Forwarded-For", x_forwarded_for)],
            )
            .await
    }

    pub async fn get_schemas(&self, request: &SchemasRequest) -> Result<SchemasResponse> {
        self.connector.execute(&endpoint::GET_SCHEMAS, request).await
    }

    pub fn close(self) {
        self.connector.close();
    }
}
