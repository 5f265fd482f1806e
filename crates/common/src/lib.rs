//! Shared building blocks for the person service crates:
//! tracing setup, health payload and process-wide Prometheus metrics.

pub mod types;
pub mod utils;
pub mod metrics;
