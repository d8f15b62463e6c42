use crate::{Codec, ConnectorError, Result, RetryPolicy, TimingLogLevel};

/// Configures transport timeout, codec, retry and timing behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectorOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Body format for requests and responses.
    pub codec: Codec,
    pub retry: RetryPolicy,
    /// Level of the default tracing timing sink.
    pub timing_log_level: TimingLogLevel,
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            codec: Codec::default(),
            retry: RetryPolicy::default(),
            timing_log_level: TimingLogLevel::default(),
        }
    }
}

/// Base URL and timing level read from the environment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectorConfig {
    pub base_url: String,
    pub timing_log_level: TimingLogLevel,
}

impl ConnectorConfig {
    /// Reads `url_var` (required, non-empty) and `level_var` (optional,
    /// defaults to `INFO`) from the process environment.
    pub fn from_env(url_var: &str, level_var: &str) -> Result<Self> {
        Self::from_lookup(url_var, level_var, |name| std::env::var(name).ok())
    }

    /// Same as [`ConnectorConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup<F>(url_var: &str, level_var: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(url_var).ok_or_else(|| {
            ConnectorError::Config(format!("missing {url_var} environment variable"))
        })?;
        if base_url.trim().is_empty() {
            return Err(ConnectorError::Config(format!(
                "{url_var} is set but empty"
            )));
        }

        let timing_log_level = match lookup(level_var) {
            Some(level) if !level.trim().is_empty() => level.parse()?,
            _ => TimingLogLevel::default(),
        };

        Ok(Self {
            base_url: base_url.trim().to_owned(),
            timing_log_level,
        })
    }

    /// Options with this config's timing level and defaults for the rest.
    pub fn options(&self) -> ConnectorOptions {
        ConnectorOptions {
            timing_log_level: self.timing_log_level,
            ..ConnectorOptions::default()
        }
    }
}
