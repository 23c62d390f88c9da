//! Observability: telemetry setup and metrics
//!
//! Structured logging goes through `tracing`; counters and histograms go
//! through the `metrics` facade.

pub mod metrics;
pub mod telemetry;
