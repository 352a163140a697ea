//! Black-box health monitoring of the search front end.
//!
//! [`probe::HealthProbe`] runs the checks, [`report`] turns the outcome into
//! JSON or Prometheus text.

pub mod config;
pub mod probe;
pub mod report;
