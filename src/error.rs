//! Error types for the monitor.

/// Errors raised by the monitor machinery itself.
///
/// An unhealthy front end is not an error: it is reported through
/// [`HealthStatus`](crate::HealthStatus). These cover failures to run the
/// probe at all.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Invalid monitor configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// The report could not be serialised.
    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, MonitorError>;
