//! Black-box HTTP health probe.
//!
//! Runs three checks in order against the front end:
//!
//! 1. `GET /healthz`, timed; 200 means [`Healthy`](HealthStatus::Healthy)
//! 2. `GET /`, passes when it answers 200 and the body contains the marker
//! 3. `POST /search` with `q=test`, following redirects; passes on 200
//!
//! A transport failure in any step stops the run and replaces the status with
//! [`Unreachable`](HealthStatus::Unreachable), [`Timeout`](HealthStatus::Timeout)
//! or [`Error`](HealthStatus::Error). Checks that completed before the failure
//! keep their results.

use std::time::Instant;

use chrono::Utc;

use super::config::MonitorConfig;
use super::report::{HealthReport, HealthStatus};
use crate::error::MonitorError;

/// Query sent by the search round-trip check.
const PROBE_QUERY: &str = "test";

/// Probes one front end.
///
/// ```rust,no_run
/// use searxng_bridge::{HealthProbe, MonitorConfig};
///
/// # async fn example() -> searxng_bridge::Result<()> {
/// let probe = HealthProbe::new(MonitorConfig::new("http://localhost:5000"))?;
/// let report = probe.check().await;
/// println!("{}", report.status);
/// # Ok(())
/// # }
/// ```
pub struct HealthProbe {
    config: MonitorConfig,
    client: reqwest::Client,
}

impl HealthProbe {
    /// Validates `config` and builds the shared HTTP client.
    pub fn new(config: MonitorConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| MonitorError::Client(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run all checks and return the report. Never fails: an unhealthy or
    /// unreachable front end is described by the report's status.
    pub async fn check(&self) -> HealthReport {
        let mut report = HealthReport::new(self.config.base_url.clone(), Utc::now().timestamp());
        if let Err(status) = self.run_checks(&mut report).await {
            report.status = status;
        }
        tracing::debug!(
            url = %report.url,
            status = %report.status,
            response_time_ms = report.response_time_ms,
            version_check = report.version_check,
            search_test = report.search_test,
            "health check complete"
        );
        report
    }

    async fn run_checks(&self, report: &mut HealthReport) -> Result<(), HealthStatus> {
        let base = self.config.base();

        let start = Instant::now();
        let resp = self
            .client
            .get(format!("{base}/healthz"))
            .timeout(self.config.check_timeout())
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        report.response_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status_code = resp.status().as_u16();
        report.status = if status_code == 200 {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy { status_code }
        };
        tracing::debug!(status_code, "liveness check answered");

        let resp = self
            .client
            .get(format!("{base}/"))
            .timeout(self.config.check_timeout())
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        if resp.status().as_u16() == 200 {
            let body = resp.text().await.map_err(|e| classify_reqwest_error(&e))?;
            report.version_check = body.contains(&self.config.marker);
        }

        let resp = self
            .client
            .post(format!("{base}/search"))
            .form(&[("q", PROBE_QUERY)])
            .timeout(self.config.search_timeout())
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        report.search_test = resp.status().as_u16() == 200;

        Ok(())
    }
}

/// Map a transport error to a report status.
fn classify_reqwest_error(err: &reqwest::Error) -> HealthStatus {
    if err.is_timeout() {
        HealthStatus::Timeout
    } else if err.is_connect() {
        HealthStatus::Unreachable
    } else {
        HealthStatus::Error(err.to_string())
    }
}
