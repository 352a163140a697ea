//! Error types for the searxng-client crate.
//!
//! Every failure a search can hit maps onto one [`SearchError`] variant with a
//! stable, human-readable message. The search path never returns these to the
//! caller directly: they are folded into
//! [`SearchResponse::from_error`](crate::types::SearchResponse::from_error).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur while querying a SearXNG instance.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The instance answered with a non-2xx HTTP status.
    #[error("SearXNG returned status code {0}")]
    UpstreamStatus(u16),

    /// The instance answered 200 but flagged an error in the payload.
    #[error("{0}")]
    UpstreamReported(String),

    /// No response arrived before the client timeout elapsed.
    #[error("request to SearXNG instance timed out")]
    Timeout,

    /// The connection could not be established or broke mid-request.
    #[error("failed to connect to SearXNG instance: {0}")]
    Connection(String),

    /// The body was not JSON, or not shaped like a search payload.
    #[error("invalid response from SearXNG instance: {0}")]
    MalformedResponse(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns the taxonomy bucket for this error.
    ///
    /// Configuration errors never reach a [`SearchResponse`](crate::SearchResponse),
    /// so they have no kind.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::UpstreamStatus(_) => Some(ErrorKind::UpstreamHttpError),
            Self::UpstreamReported(_) => Some(ErrorKind::UpstreamReportedError),
            Self::Timeout => Some(ErrorKind::Timeout),
            Self::Connection(_) => Some(ErrorKind::ConnectionFailure),
            Self::MalformedResponse(_) => Some(ErrorKind::MalformedResponse),
            Self::Config(_) => None,
        }
    }
}

/// Coarse classification of search failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Non-2xx HTTP status from the instance.
    UpstreamHttpError,
    /// The instance reported an error inside a 200 payload.
    UpstreamReportedError,
    /// The request timed out.
    Timeout,
    /// Connection refused, DNS failure, TLS failure and similar.
    ConnectionFailure,
    /// Unparseable or mis-shaped payload.
    MalformedResponse,
}

impl ErrorKind {
    /// Stable identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpstreamHttpError => "upstream_http_error",
            Self::UpstreamReportedError => "upstream_reported_error",
            Self::Timeout => "timeout",
            Self::ConnectionFailure => "connection_failure",
            Self::MalformedResponse => "malformed_response",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenience type alias for searxng-client results.
pub type Result<T> = std::result::Result<T, SearchError>;
