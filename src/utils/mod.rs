//! Cross-cutting utilities: logging setup, structured error context and
//! Prometheus metrics.

pub mod logging;
pub mod metrics;
