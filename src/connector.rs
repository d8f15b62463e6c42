use std::{fmt, sync::Arc, time::Duration};

use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::time::sleep;

use crate::{
    endpoint::endpoint_url,
    timing::{Stopwatch, TimingSink, TracingTimingSink},
    ConnectorConfig, ConnectorError, ConnectorOptions, Endpoint, Result,
};

/// Generic typed HTTP connector for one update service base URL.
///
/// Every call is a single POST, retried according to the configured
/// [`RetryPolicy`](crate::RetryPolicy) and timed through the configured
/// [`TimingSink`]. Cloning is cheap and shares the underlying transport.
#[derive(Clone)]
pub struct Connector {
    http: reqwest::Client,
    base_url: String,
    options: ConnectorOptions,
    timing: Arc<dyn TimingSink>,
    // false once a caller injected its own sink
    default_timing: bool,
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("base_url", &self.base_url)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Connector {
    /// Creates a connector with default options.
    ///
    /// Fails with [`ConnectorError::InvalidArgument`] when `base_url` is empty
    /// or not an absolute `http`/`https` URL with a host.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConnectorError::InvalidArgument(
                "base URL must not be empty".to_owned(),
            ));
        }
        validate_base_url(trimmed)?;
        let options = ConnectorOptions::default();
        tracing::info!("creating connector for: {trimmed}");
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: trimmed.to_owned(),
            timing: Arc::new(TracingTimingSink::new(options.timing_log_level)),
            default_timing: true,
            options,
        })
    }

    /// Creates a connector from environment-derived configuration.
    pub fn from_config(config: &ConnectorConfig) -> Result<Self> {
        Ok(Self::new(config.base_url.as_str())?.with_options(config.options()))
    }

    /// Applies options.
    ///
    /// The default tracing sink follows `opts.timing_log_level`; a sink
    /// injected with [`Connector::with_timing_sink`] is kept as is.
    pub fn with_options(mut self, opts: ConnectorOptions) -> Self {
        if self.default_timing {
            self.timing = Arc::new(TracingTimingSink::new(opts.timing_log_level));
        }
        self.options = opts;
        self
    }

    /// Routes timing messages to `sink` instead of `tracing`.
    pub fn with_timing_sink(mut self, sink: Arc<dyn TimingSink>) -> Self {
        self.timing = sink;
        self.default_timing = false;
        self
    }

    /// Uses a preconfigured `reqwest` client, e.g. with a proxy or custom TLS.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn options(&self) -> &ConnectorOptions {
        &self.options
    }

    /// POSTs `payload` to `endpoint` and decodes the reply.
    pub async fn execute<Req, Resp>(&self, endpoint: &Endpoint, payload: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        self.execute_with_headers(endpoint, payload, &[]).await
    }

    /// Like [`Connector::execute`], attaching extra request headers.
    pub async fn execute_with_headers<Req, Resp>(
        &self,
        endpoint: &Endpoint,
        payload: &Req,
        headers: &[(&str, &str)],
    ) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let _stopwatch = Stopwatch::start(self.timing.as_ref(), endpoint.name);

        let codec = self.options.codec;
        let body = codec.encode(payload)?;
        let headers = self.build_headers(headers)?;
        tracing::trace!(
            "{} request body: {}",
            endpoint.name,
            String::from_utf8_lossy(&body)
        );

        let (status, response_body) = self.send_with_retry(endpoint, body, headers).await?;
        if status != endpoint.expected_status {
            return Err(ConnectorError::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&response_body).into_owned(),
            });
        }

        codec.decode::<Resp>(&response_body)?.ok_or_else(|| {
            ConnectorError::EmptyResponse(format!(
                "{} returned with null-valued {} entity",
                endpoint.name,
                std::any::type_name::<Resp>()
            ))
        })
    }

    /// Drops this handle on the transport.
    ///
    /// Clones share one `reqwest` client; its connections are released when
    /// the last clone is closed or dropped.
    pub fn close(self) {
        tracing::debug!("closing connector for: {}", self.base_url);
    }

    fn build_headers(&self, extra: &[(&str, &str)]) -> Result<HeaderMap> {
        let mime = HeaderValue::from_static(self.options.codec.mime_type());
        let mut headers = HeaderMap::with_capacity(extra.len() + 2);
        headers.insert(header::CONTENT_TYPE, mime.clone());
        headers.insert(header::ACCEPT, mime);

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                ConnectorError::InvalidArgument(format!("invalid header name '{name}': {err}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|err| {
                ConnectorError::InvalidArgument(format!("invalid value for header '{name}': {err}"))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    async fn send_with_retry(
        &self,
        endpoint: &Endpoint,
        body: Vec<u8>,
        headers: HeaderMap,
    ) -> Result<(StatusCode, Vec<u8>)> {
        let url = endpoint_url(&self.base_url, endpoint.path);
        let policy = &self.options.retry;
        let mut attempt = 0usize;
        loop {
            tracing::debug!("POST {url} (attempt {})", attempt + 1);
            let response = self
                .http
                .post(&url)
                .headers(headers.clone())
                .timeout(Duration::from_millis(self.options.timeout_ms))
                .body(body.clone())
                .send()
                .await;

            match response {
                Ok(response) => {
                    let status = response.status();
                    if policy.should_retry_status(status, attempt) {
                        tracing::warn!(
                            "{} returned {status}, retrying in {:?}",
                            endpoint.name,
                            policy.delay
                        );
                        sleep(policy.delay).await;
                        attempt += 1;
                        continue;
                    }

                    let body = response.bytes().await.map_err(ConnectorError::Transport)?;
                    return Ok((status, body.to_vec()));
                }
                Err(err) => {
                    if policy.should_retry_transport(&err, attempt) {
                        tracing::warn!(
                            "{} transport failure: {err}; retrying in {:?}",
                            endpoint.name,
                            policy.delay
                        );
                        sleep(policy.delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(ConnectorError::Transport(err));
                }
            }
        }
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let url = reqwest::Url::parse(base_url).map_err(|err| {
        ConnectorError::InvalidArgument(format!("invalid base URL '{base_url}': {err}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConnectorError::InvalidArgument(format!(
            "base URL '{base_url}' must be an absolute http or https URL"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::Connector;
    use crate::{ConnectorError, ConnectorOptions, TimingSink};

    struct NoopSink;

    impl TimingSink for NoopSink {
        fn record(&self, _operation: &str, _elapsed: Duration) {}
    }

    #[test]
    fn rejects_base_url_without_http_scheme() {
        for base_url in ["updateservice:8080", "localhost:8080", "not a url", "ftp://host/x"] {
            let err = Connector::new(base_url).expect_err(base_url);
            assert!(matches!(err, ConnectorError::InvalidArgument(_)), "{base_url}");
        }
        assert!(Connector::new("https://updateservice.dbc.dk/UpdateService/rest").is_ok());
    }

    #[test]
    fn with_options_keeps_injected_sink() {
        let connector = Connector::new("http://localhost")
            .expect("must build")
            .with_timing_sink(Arc::new(NoopSink))
            .with_options(ConnectorOptions::default());
        assert!(!connector.default_timing);

        let connector = Connector::new("http://localhost")
            .expect("must build")
            .with_options(ConnectorOptions::default());
        assert!(connector.default_timing);
    }

    #[test]
    fn rejects_empty_base_url() {
        let err = Connector::new("  ").expect_err("must reject empty base url");
        assert!(matches!(err, ConnectorError::InvalidArgument(_)));
    }

    #[test]
    fn trims_trailing_slash() {
        let connector = Connector::new("http://localhost:8080/").expect("must build");
        assert_eq!(connector.base_url(), "http://localhost:8080");
    }

    #[test]
    fn rejects_invalid_header_name() {
        let connector = Connector::new("http://localhost").expect("must build");
        let err = connector
            .build_headers(&[("X Forwarded", "127.0.0.1")])
            .expect_err("must reject");
        assert!(matches!(err, ConnectorError::InvalidArgument(_)));
    }

    #[test]
    fn sets_content_type_and_accept() {
        let connector = Connector::new("http://localhost").expect("must build");
        let headers = connector
            .build_headers(&[("X-Forwarded-For", "10.0.0.1")])
            .expect("must build headers");
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["x-forwarded-for"], "10.0.0.1");
    }

    #[test]
    fn debug_shows_base_url() {
        let connector = Connector::new("http://updateservice").expect("must build");
        assert!(format!("{connector:?}").contains("http://updateservice"));
    }
}
