//! Observability for the configurator service.
//!
//! Prometheus metrics are recorded through the `metrics` facade and rendered
//! by the `/metrics` endpoint. Structured logging lives in [`crate::telemetry`].

pub mod metrics;

pub use metrics::{
    MetricsError, install_recorder, record_generator_latency, record_price_calculation,
    record_suggestion, record_validation,
};
