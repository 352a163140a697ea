//! searxng-bridge: operational tooling for the SearXNG-backed search front end.
//!
//! The search adapter itself lives in the `searxng-client` workspace crate.
//! This crate holds the black-box health monitor: it probes the running front
//! end over HTTP and reports liveness and basic metrics as JSON or in the
//! Prometheus text exposition format.
//!
//! # Checks
//!
//! - **Liveness**: `GET /healthz` must answer 200
//! - **Root page**: `GET /` must answer 200 and contain a marker string
//! - **Search**: a minimal `POST /search` round-trip must answer 200

pub mod error;
pub mod monitor;

pub use error::{MonitorError, Result};
pub use monitor::config::MonitorConfig;
pub use monitor::probe::HealthProbe;
pub use monitor::report::{HealthReport, HealthStatus, OutputFormat};
