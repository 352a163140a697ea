//! Monitor configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::MonitorError;

/// Configuration for a [`HealthProbe`](crate::HealthProbe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Base URL of the front end to monitor.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Text the root page must contain to pass the page check.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Timeout in seconds for the liveness and root page checks.
    #[serde(default = "default_check_timeout_secs")]
    pub check_timeout_secs: u64,
    /// Timeout in seconds for the search round-trip.
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,
    /// Delay between probes in continuous mode, in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_marker() -> String {
    "Whoogle".to_string()
}

fn default_check_timeout_secs() -> u64 {
    10
}

fn default_search_timeout_secs() -> u64 {
    15
}

fn default_interval_secs() -> u64 {
    60
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            marker: default_marker(),
            check_timeout_secs: default_check_timeout_secs(),
            search_timeout_secs: default_search_timeout_secs(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl MonitorConfig {
    /// Create a monitor config for a specific front end.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_check_timeout_secs(mut self, secs: u64) -> Self {
        self.check_timeout_secs = secs;
        self
    }

    pub fn with_search_timeout_secs(mut self, secs: u64) -> Self {
        self.search_timeout_secs = secs;
        self
    }

    pub fn with_interval_secs(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    /// Base URL without trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.check_timeout_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.base().is_empty() {
            return Err(MonitorError::Config("base_url must not be empty".into()));
        }
        if !(self.base().starts_with("http://") || self.base().starts_with("https://")) {
            return Err(MonitorError::Config(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.check_timeout_secs == 0 || self.search_timeout_secs == 0 {
            return Err(MonitorError::Config(
                "timeouts must be greater than 0".into(),
            ));
        }
        if self.interval_secs == 0 {
            return Err(MonitorError::Config(
                "interval_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
