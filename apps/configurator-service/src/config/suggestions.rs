//! Generative suggestion service configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the generative AI client.
///
/// The API key is never written in the config file itself; reference an
/// environment variable instead (`api_key: ${GEMINI_API_KEY}`).
#[derive(Clone, Serialize, Deserialize)]
pub struct SuggestionsConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key. Empty disables AI suggestions.
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retries after the first attempt on transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Initial retry backoff in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum output tokens.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl SuggestionsConfig {
    /// Whether an API key is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl std::fmt::Debug for SuggestionsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionsConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &if self.is_enabled() { "[REDACTED]" } else { "" })
            .field("timeout_ms", &self.timeout_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

const fn default_timeout_ms() -> u64 {
    15_000
}

const fn default_max_retries() -> u32 {
    1
}

const fn default_retry_backoff_ms() -> u64 {
    250
}

const fn default_temperature() -> f64 {
    0.7
}

const fn default_max_output_tokens() -> u32 {
    1000
}
