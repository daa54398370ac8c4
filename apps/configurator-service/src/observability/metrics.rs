//! Prometheus metrics for the configurator service.
//!
//! Recording functions are no-ops until a recorder is installed, so the
//! engines can call them unconditionally (and tests never install one).

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

/// Histogram buckets for generator round trips, 50ms to 30s.
const GENERATOR_LATENCY_BUCKETS: [f64; 9] = [0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 15.0, 30.0];

/// Install the global Prometheus recorder.
///
/// The returned handle renders the exposition text for `/metrics`.
///
/// # Errors
///
/// Returns an error if the bucket configuration is rejected or a global
/// recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("configurator_generator_latency_seconds".to_string()),
            &GENERATOR_LATENCY_BUCKETS,
        )
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!("Prometheus metrics recorder installed");

    Ok(handle)
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Engine Metrics
// ============================================================================

/// Record a validation outcome.
pub fn record_validation(valid: bool) {
    counter!(
        "configurator_validations_total",
        "valid" => valid.to_string()
    )
    .increment(1);
}

/// Record a price calculation.
pub fn record_price_calculation() {
    counter!("configurator_price_calculations_total").increment(1);
}

// ============================================================================
// Suggestion Metrics
// ============================================================================

/// Record a suggestion served.
///
/// # Arguments
///
/// * `source` - Where the recommendation came from ("ai" or "fallback")
pub fn record_suggestion(source: &str) {
    counter!(
        "configurator_suggestions_total",
        "source" => source.to_string()
    )
    .increment(1);
}

/// Record one round trip to the text generator.
///
/// # Arguments
///
/// * `outcome` - "ok" or "error"
/// * `latency_seconds` - Wall time of the call including retries
pub fn record_generator_latency(outcome: &str, latency_seconds: f64) {
    histogram!(
        "configurator_generator_latency_seconds",
        "outcome" => outcome.to_string()
    )
    .record(latency_seconds);
}
