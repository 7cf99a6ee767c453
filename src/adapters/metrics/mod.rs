//! Metrics and Monitoring Adapters
//!
//! Provides the Prometheus registry behind /metrics and the shared
//! health state behind /live and /ready. The routes themselves are
//! mounted by the HTTP adapter.

pub mod health;
pub mod prometheus;

pub use health::HealthState;
pub use prometheus::MetricsRegistry;
