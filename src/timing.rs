use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

use crate::ConnectorError;

/// Log level used for per-call timing messages.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TimingLogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for TimingLogLevel {
    type Err = ConnectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            other => Err(ConnectorError::Config(format!(
                "unknown timing log level '{other}'"
            ))),
        }
    }
}

impl fmt::Display for TimingLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Receives the elapsed time of each connector call.
///
/// A sink is handed to the connector at construction; nothing is routed
/// through process-wide logger state.
pub trait TimingSink: Send + Sync {
    fn record(&self, operation: &str, elapsed: Duration);
}

/// Default sink: emits `"<operation> took <n> milliseconds"` as a `tracing`
/// event at the configured level.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TracingTimingSink {
    level: TimingLogLevel,
}

impl TracingTimingSink {
    pub fn new(level: TimingLogLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> TimingLogLevel {
        self.level
    }
}

impl TimingSink for TracingTimingSink {
    fn record(&self, operation: &str, elapsed: Duration) {
        let millis = elapsed.as_millis();
        match self.level {
            TimingLogLevel::Trace => tracing::trace!("{operation} took {millis} milliseconds"),
            TimingLogLevel::Debug => tracing::debug!("{operation} took {millis} milliseconds"),
            TimingLogLevel::Info => tracing::info!("{operation} took {millis} milliseconds"),
            TimingLogLevel::Warn => tracing::warn!("{operation} took {millis} milliseconds"),
            TimingLogLevel::Error => tracing::error!("{operation} took {millis} milliseconds"),
        }
    }
}

/// Scoped measurement: reports to the sink when dropped, on every exit path.
pub(crate) struct Stopwatch<'a> {
    sink: &'a dyn TimingSink,
    operation: &'a str,
    started: Instant,
}

impl<'a> Stopwatch<'a> {
    pub(crate) fn start(sink: &'a dyn TimingSink, operation: &'a str) -> Self {
        Self {
            sink,
            operation,
            started: Instant::now(),
        }
    }
}

impl Drop for Stopwatch<'_> {
    fn drop(&mut self) {
        self.sink.record(self.operation, self.started.elapsed());
    }
}
