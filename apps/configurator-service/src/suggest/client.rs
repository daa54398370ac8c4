//! Text generator seam and the Gemini REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::retry::{Backoff, is_retryable_status};
use crate::config::SuggestionsConfig;

/// Errors from a text generator.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// No API key configured.
    #[error("text generator is not configured")]
    NotConfigured,

    /// Could not build the HTTP client.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success status from the API.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or message.
        message: String,
    },

    /// The response carried no candidate text.
    #[error("empty response from generator")]
    EmptyResponse,

    /// Response body did not decode.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl GeneratorError {
    fn is_transient(&self) -> bool {
        match self {
            Self::Timeout | Self::Network(_) => true,
            Self::Api { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Produces free text from a prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

// ============================================================================
// Gemini wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

// ============================================================================
// Client
// ============================================================================

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    temperature: f64,
    max_output_tokens: u32,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl GeminiClient {
    /// Create a client from config.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::NotConfigured`] without an API key, or
    /// [`GeneratorError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &SuggestionsConfig) -> Result<Self, GeneratorError> {
        if !config.is_enabled() {
            return Err(GeneratorError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GeneratorError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    async fn attempt(&self, body: &GenerateRequest<'_>) -> Result<String, GeneratorError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout
                } else {
                    GeneratorError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GeneratorError::Timeout
            } else {
                GeneratorError::JsonParse(e.to_string())
            }
        })?;

        decoded.into_text().ok_or(GeneratorError::EmptyResponse)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };
        let mut backoff = Backoff::new(self.max_retries, self.retry_backoff_ms);

        loop {
            match self.attempt(&body).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() => {
                    let Some(delay) = backoff.next_backoff() else {
                        return Err(e);
                    };
                    tracing::warn!(
                        error = %e,
                        delay_ms = delay.as_millis(),
                        retry = backoff.retries(),
                        "Generator call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_api_key() {
        assert!(matches!(
            GeminiClient::new(&SuggestionsConfig::default()),
            Err(GeneratorError::NotConfigured)
        ));
    }

    #[test]
    fn endpoint_includes_model() {
        let config = SuggestionsConfig {
            api_key: "test-key".to_string(),
            base_url: "http://localhost:9999/".to_string(),
            ..SuggestionsConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint,
            "http://localhost:9999/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn request_uses_camel_case() {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 1000,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1000);
    }

    #[test]
    fn response_text_is_joined() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn blank_response_is_empty() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(response.into_text(), None);
    }

    #[test]
    fn transient_errors() {
        assert!(GeneratorError::Timeout.is_transient());
        assert!(GeneratorError::Api { status: 503, message: String::new() }.is_transient());
        assert!(!GeneratorError::Api { status: 400, message: String::new() }.is_transient());
        assert!(!GeneratorError::EmptyResponse.is_transient());
    }
}
