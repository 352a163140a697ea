//! Health report model and its output formats.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::MonitorError;

/// Overall status of the monitored front end.
///
/// Serialises as its display string (`"healthy"`, `"unhealthy (HTTP 503)"`,
/// ...), which is what dashboards key on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// No check has completed yet.
    Unknown,
    /// The liveness endpoint answered 200.
    Healthy,
    /// The liveness endpoint answered with another status.
    Unhealthy {
        /// HTTP status code from the liveness endpoint.
        status_code: u16,
    },
    /// Connection refused or host unreachable.
    Unreachable,
    /// A check did not answer in time.
    Timeout,
    /// Any other transport failure.
    Error(String),
}

impl HealthStatus {
    /// Returns `true` only for [`HealthStatus::Healthy`].
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Healthy => f.write_str("healthy"),
            Self::Unhealthy { status_code } => write!(f, "unhealthy (HTTP {status_code})"),
            Self::Unreachable => f.write_str("unreachable"),
            Self::Timeout => f.write_str("timeout"),
            Self::Error(detail) => write!(f, "error: {detail}"),
        }
    }
}

impl Serialize for HealthStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of one probe run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Unix timestamp (seconds) when the probe started.
    pub timestamp: i64,
    /// Base URL that was probed.
    pub url: String,
    pub status: HealthStatus,
    /// Round-trip time of the liveness check in milliseconds.
    pub response_time_ms: u64,
    /// Whether the root page loaded and contained the marker string.
    pub version_check: bool,
    /// Whether the search round-trip answered 200.
    pub search_test: bool,
}

impl HealthReport {
    /// A report with nothing checked yet.
    pub fn new(url: impl Into<String>, timestamp: i64) -> Self {
        Self {
            timestamp,
            url: url.into(),
            status: HealthStatus::Unknown,
            response_time_ms: 0,
            version_check: false,
            search_test: false,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, MonitorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Prometheus text exposition format.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        let instance = escape_label_value(&self.url);
        let lines = [
            "# HELP whoogle_up Whether Whoogle is up and responding".to_string(),
            "# TYPE whoogle_up gauge".to_string(),
            format!(
                "whoogle_up{{instance=\"{instance}\"}} {}",
                u8::from(self.is_healthy())
            ),
            String::new(),
            "# HELP whoogle_response_time_milliseconds Response time in milliseconds".to_string(),
            "# TYPE whoogle_response_time_milliseconds gauge".to_string(),
            format!(
                "whoogle_response_time_milliseconds{{instance=\"{instance}\"}} {}",
                self.response_time_ms
            ),
            String::new(),
            "# HELP whoogle_search_test Whether search functionality is working".to_string(),
            "# TYPE whoogle_search_test gauge".to_string(),
            format!(
                "whoogle_search_test{{instance=\"{instance}\"}} {}",
                u8::from(self.search_test)
            ),
        ];
        lines.join("\n")
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object.
    #[default]
    Json,
    /// Prometheus text exposition format.
    Prometheus,
}

impl OutputFormat {
    /// Render `report` in this format.
    pub fn render(self, report: &HealthReport) -> Result<String, MonitorError> {
        match self {
            Self::Json => report.to_json(),
            Self::Prometheus => Ok(report.to_prometheus()),
        }
    }
}

/// Escape a Prometheus label value: backslash, double quote and newline.
fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
