//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and `tower_http`. Output is JSON lines or human-readable text.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Errors initializing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// Offending filter.
        filter: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Build the filter from `RUST_LOG` or the configured level.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] if the configured level does not parse.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directives = format!(
        "warn,configurator_service={level},tower_http={level}",
        level = config.level
    );
    EnvFilter::try_new(&directives).map_err(|e| TelemetryError::InvalidFilter {
        filter: directives,
        message: e.to_string(),
    })
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.format == "pretty" {
        builder.with_target(true).try_init()
    } else {
        builder
            .json()
            .with_current_span(false)
            .flatten_event(true)
            .try_init()
    };

    result.map_err(|e| TelemetryError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_builds() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn test_default_level_builds() {
        assert!(env_filter(&LoggingConfig::default()).is_ok());
    }
}
