//! Configuration module for the configurator service.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for all service components.
//!
//! # Usage
//!
//! ```rust,ignore
//! use configurator_service::config::{Config, load_config};
//!
//! // Load from default path (config.yaml), falling back to defaults
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod catalog;
mod observability;
mod pricing;
mod server;
mod sessions;
mod suggestions;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::CatalogConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use pricing::{DiscountConfig, PricingConfig};
pub use server::ServerConfig;
pub use sessions::SessionsConfig;
pub use suggestions::SuggestionsConfig;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "CONFIGURATOR_CONFIG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Pricing policy.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Generative suggestion client.
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    /// Saved-configuration sessions.
    #[serde(default)]
    pub sessions: SessionsConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// When no path is given, the default path is used and a missing file yields
/// the built-in defaults. An explicitly named file must exist.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let explicit = path.is_some();
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "Config file not found, using defaults");
            let config = Config::default();
            validate_config(&config)?;
            return Ok(config);
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_string(),
                source: e,
            });
        }
    };

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    let pricing = &config.pricing;
    if pricing.tax_rate < Decimal::ZERO || pricing.tax_rate > Decimal::ONE {
        return Err(ConfigError::ValidationError(
            "pricing.tax_rate must be between 0.0 and 1.0".to_string(),
        ));
    }
    if pricing.destination_fee.is_negative() {
        return Err(ConfigError::ValidationError(
            "pricing.destination_fee must not be negative".to_string(),
        ));
    }
    if !pricing.fallback_base_price.is_positive() {
        return Err(ConfigError::ValidationError(
            "pricing.fallback_base_price must be positive".to_string(),
        ));
    }
    let discounts = &pricing.discounts;
    if [
        discounts.premium_technology,
        discounts.m_packages,
        discounts.multi_package,
    ]
    .iter()
    .any(|d| d.is_negative())
    {
        return Err(ConfigError::ValidationError(
            "pricing.discounts amounts must not be negative".to_string(),
        ));
    }

    let suggestions = &config.suggestions;
    if suggestions.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "suggestions.timeout_ms must be positive".to_string(),
        ));
    }
    if suggestions.max_retries > 1 {
        return Err(ConfigError::ValidationError(
            "suggestions.max_retries must be 0 or 1".to_string(),
        ));
    }
    if !(0.0..=2.0).contains(&suggestions.temperature) {
        return Err(ConfigError::ValidationError(
            "suggestions.temperature must be between 0.0 and 2.0".to_string(),
        ));
    }
    if !suggestions.base_url.starts_with("http://") && !suggestions.base_url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(
            "suggestions.base_url must be an http(s) URL".to_string(),
        ));
    }

    if config.sessions.max_saved == 0 {
        return Err(ConfigError::ValidationError(
            "sessions.max_saved must be positive".to_string(),
        ));
    }
    if config.sessions.max_sessions == 0 {
        return Err(ConfigError::ValidationError(
            "sessions.max_sessions must be positive".to_string(),
        ));
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}
