//! Client configuration with sensible defaults.
//!
//! [`ClientConfig`] names the SearXNG instance, the request timeout, the
//! default engine set and an optional fixed User-Agent. It deserialises from
//! any serde format so the host application can keep it in its own config
//! file.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Known public SearXNG instances. The first entry is the default.
pub const DEFAULT_INSTANCES: &[&str] = &[
    "https://search.bus-hit.me",
    "https://search.sapti.me",
    "https://searx.tiekoetter.com",
];

/// Configuration for a [`SearchClient`](crate::client::SearchClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the SearXNG instance, e.g. `https://searx.example.com`.
    #[serde(default = "default_instance_url")]
    pub instance_url: String,
    /// Request timeout in seconds, covering connect and body read.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Comma-separated engines used when a query does not override them.
    /// Empty lets the instance pick its own defaults.
    #[serde(default = "default_engines")]
    pub engines: String,
    /// Custom User-Agent string. If `None`, one of a built-in list of
    /// browser User-Agents is picked when the HTTP client is built.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_instance_url() -> String {
    DEFAULT_INSTANCES[0].to_owned()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_engines() -> String {
    "google".to_owned()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            instance_url: default_instance_url(),
            timeout_seconds: default_timeout_seconds(),
            engines: default_engines(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a config for a specific instance with default settings.
    pub fn new(instance_url: impl Into<String>) -> Self {
        Self {
            instance_url: instance_url.into(),
            ..Default::default()
        }
    }

    /// Set the timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_seconds = secs;
        self
    }

    /// Set the default engine list.
    pub fn with_engines(mut self, engines: impl Into<String>) -> Self {
        self.engines = engines.into();
        self
    }

    /// Use a fixed User-Agent instead of the rotation list.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The instance URL with every trailing slash removed.
    pub fn normalized_instance_url(&self) -> &str {
        self.instance_url.trim_end_matches('/')
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `instance_url` is a non-empty absolute `http`/`https` URL
    /// - `timeout_seconds` is greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        let base = self.normalized_instance_url();
        if base.is_empty() {
            return Err(SearchError::Config("instance_url must not be empty".into()));
        }
        let parsed = url::Url::parse(base)
            .map_err(|e| SearchError::Config(format!("instance_url is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Config(format!(
                "instance_url must use http or https, got {}",
                parsed.scheme()
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
