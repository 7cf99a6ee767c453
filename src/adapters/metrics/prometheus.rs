//! Prometheus Metrics Registry - Quoting Observability
//!
//! Registers and exposes Prometheus metrics for the quoting pipeline:
//! quote volume and failures, geocoder outcomes, port-search sources,
//! and end-to-end quote latency.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

/// Centralized Prometheus metrics for the quoting engine.
///
/// All metrics follow the naming convention `freight_quoter_*` and
/// carry mode/reason/outcome labels for dashboard filtering.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Quotes generated, by transport mode.
    pub quotes_generated: IntCounterVec,
    /// Quote failures, by error kind.
    pub quote_failures: IntCounterVec,
    /// Geocoder calls, by outcome (found/no_match/unavailable).
    pub geocode_outcomes: IntCounterVec,
    /// Port searches, by serving source (local/external/none).
    pub port_searches: IntCounterVec,
    /// Quote generation latency in seconds, by mode.
    pub quote_latency_seconds: HistogramVec,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let quotes_generated = IntCounterVec::new(
            Opts::new(
                "freight_quoter_quotes_generated_total",
                "Total quotes generated",
            ),
            &["mode"],
        )?;

        let quote_failures = IntCounterVec::new(
            Opts::new(
                "freight_quoter_quote_failures_total",
                "Total failed quote requests",
            ),
            &["reason"],
        )?;

        let geocode_outcomes = IntCounterVec::new(
            Opts::new(
                "freight_quoter_geocode_outcomes_total",
                "Geocoder call outcomes",
            ),
            &["outcome"],
        )?;

        let port_searches = IntCounterVec::new(
            Opts::new(
                "freight_quoter_port_searches_total",
                "Port directory searches by serving source",
            ),
            &["source"],
        )?;

        let quote_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "freight_quoter_quote_latency_seconds",
                "End-to-end quote generation latency",
            )
            .buckets(vec![0.005, 0.025, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["mode"],
        )?;

        // Register all metrics
        registry.register(Box::new(quotes_generated.clone()))?;
        registry.register(Box::new(quote_failures.clone()))?;
        registry.register(Box::new(geocode_outcomes.clone()))?;
        registry.register(Box::new(port_searches.clone()))?;
        registry.register(Box::new(quote_latency_seconds.clone()))?;

        Ok(Self {
            registry,
            quotes_generated,
            quote_failures,
            geocode_outcomes,
            port_searches,
            quote_latency_seconds,
        })
    }

    /// Encode the current metric families in the text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds_and_renders() {
        let metrics = MetricsRegistry::new().unwrap();
        metrics.quotes_generated.with_label_values(&["road"]).inc();
        metrics
            .quote_failures
            .with_label_values(&["no_available_rates"])
            .inc();
        let text = metrics.render();
        assert!(text.contains("freight_quoter_quotes_generated_total"));
        assert!(text.contains("freight_quoter_quote_failures_total"));
    }
}
