// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Configurator Service - Rust Core Library
//!
//! Vehicle configuration service: a static model/option catalog, a
//! constraint engine, a price calculator and AI-assisted suggestions.
//!
//! # Architecture
//!
//! - **Domain**: `models` (catalog entries, configurations, results, money)
//! - **Engines**: `catalog` (loading and lookups), `rules` (validation),
//!   `pricing` (breakdowns and combo discounts)
//! - **Integrations**: `suggest` (generative AI client, prompt, fallback),
//!   `session` (saved configurations)
//! - **Surface**: `server` (HTTP/JSON API), `error`, `config`,
//!   `observability`, `telemetry`
//!
//! Validation and pricing are pure functions of the model, the configuration,
//! the catalog and the pricing policy. The catalog is immutable and shared
//! behind `Arc`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Domain
// =============================================================================

/// Core data types.
pub mod models;

// =============================================================================
// Engines
// =============================================================================

/// Catalog loading and lookups.
pub mod catalog;

/// Pricing engine.
pub mod pricing;

/// Constraint engine.
pub mod rules;

// =============================================================================
// Integrations
// =============================================================================

/// Saved-configuration sessions.
pub mod session;

/// AI-assisted suggestions.
pub mod suggest;

// =============================================================================
// Surface and ambient concerns
// =============================================================================

/// Configuration loading.
pub mod config;

/// Service errors.
pub mod error;

/// Metrics.
pub mod observability;

/// HTTP/JSON API.
pub mod server;

/// Logging setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{Catalog, CatalogError};
pub use config::{Config, ConfigError, load_config};
pub use error::{ErrorCode, HttpErrorResponse, ServiceError};
pub use models::{Configuration, Money, PriceBreakdown, ValidationResult};
pub use pricing::PriceCalculator;
pub use rules::ConfigurationValidator;
pub use server::{AppState, create_router};
pub use session::{SessionError, SessionStore};
pub use suggest::{GeminiClient, SuggestionService, TextGenerator};
