use std::time::Duration;

use reqwest::StatusCode;

/// Fixed-delay retry policy applied around every connector call.
///
/// The default retries once, ten seconds later, when the transport fails or
/// the service answers `404 Not Found`. A 404 from the update service means
/// the service is still starting up behind its proxy, not that the resource
/// is missing. No other status is ever retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Statuses that trigger a retry.
    pub retry_statuses: Vec<StatusCode>,
    /// Pause between attempts.
    pub delay: Duration,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_statuses: vec![StatusCode::NOT_FOUND],
            delay: Duration::from_secs(10),
            max_retries: 1,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Replaces the delay between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replaces the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub(crate) fn should_retry_status(&self, status: StatusCode, attempt: usize) -> bool {
        attempt < self.max_retries && self.retry_statuses.contains(&status)
    }

    pub(crate) fn should_retry_transport(&self, err: &reqwest::Error, attempt: usize) -> bool {
        attempt < self.max_retries
            && (err.is_timeout() || err.is_connect() || err.is_request() || err.is_body())
    }
}
