//! Rich error handling for the configurator service.
//!
//! Errors carry a stable code, a human-readable message and key/value
//! context. Only request-level failures become errors; constraint violations
//! are reported as data in a `ValidationResult`.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `INVALID_REQUEST` | 400 | Malformed body or missing fields |
//! | `UNKNOWN_MODEL` | 404 | Model not in the catalog |
//! | `UNKNOWN_SERIES` | 404 | Series not in the catalog |
//! | `CONFIGURATION_NOT_FOUND` | 404 | Saved configuration index out of range |
//! | `SAVED_LIMIT_REACHED` | 409 | Session holds the maximum saved configurations |
//! | `EXTERNAL_SERVICE_UNAVAILABLE` | 503 | AI generator not configured |
//! | `INTERNAL_ERROR` | 500 | Unexpected server error |

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::SessionError;
use crate::suggest::SuggestError;

/// Error codes for the configurator service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid request format or missing fields.
    InvalidRequest,
    /// Model not in the catalog.
    UnknownModel,
    /// Series not in the catalog.
    UnknownSeries,
    /// No saved configuration at the requested index.
    ConfigurationNotFound,
    /// Session capacity exhausted.
    SavedLimitReached,
    /// AI generator not configured.
    ExternalServiceUnavailable,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::UnknownModel | Self::UnknownSeries | Self::ConfigurationNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::SavedLimitReached => StatusCode::CONFLICT,
            Self::ExternalServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wire string for this code.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::UnknownModel => "UNKNOWN_MODEL",
            Self::UnknownSeries => "UNKNOWN_SERIES",
            Self::ConfigurationNotFound => "CONFIGURATION_NOT_FOUND",
            Self::SavedLimitReached => "SAVED_LIMIT_REACHED",
            Self::ExternalServiceUnavailable => "EXTERNAL_SERVICE_UNAVAILABLE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A rich error with context.
#[derive(Debug, Error)]
pub struct ServiceError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl ServiceError {
    /// Create a new service error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Convert to an HTTP error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            status: self.code.http_status().as_u16(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Additional details.
    pub details: BTreeMap<String, String>,
}

/// Convenience constructors for common errors.
impl ServiceError {
    /// Invalid request format.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Model not in the catalog.
    #[must_use]
    pub fn unknown_model(model: &str) -> Self {
        Self::new(ErrorCode::UnknownModel, format!("Model {model} not found"))
            .with_context("model", model)
    }

    /// Series not in the catalog.
    #[must_use]
    pub fn unknown_series(series: &str) -> Self {
        Self::new(ErrorCode::UnknownSeries, format!("Series {series} not found"))
            .with_context("series", series)
    }

    /// Saved configuration missing.
    #[must_use]
    pub fn configuration_not_found(index: usize) -> Self {
        Self::new(
            ErrorCode::ConfigurationNotFound,
            format!("Configuration {index} not found"),
        )
        .with_context("index", index.to_string())
    }

    /// AI generator unavailable.
    #[must_use]
    pub fn external_service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceUnavailable, message)
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<SuggestError> for ServiceError {
    fn from(err: SuggestError) -> Self {
        match err {
            SuggestError::UnknownModel(model) => Self::unknown_model(&model),
            SuggestError::Unavailable => Self::external_service_unavailable(err.to_string())
                .with_context("setup", "set GEMINI_API_KEY and reference it from suggestions.api_key"),
        }
    }
}

impl From<SessionError> for ServiceError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound { index } => Self::configuration_not_found(index),
            SessionError::LimitReached { limit } => {
                Self::new(ErrorCode::SavedLimitReached, err.to_string())
                    .with_context("limit", limit.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidRequest.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::UnknownModel.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::UnknownSeries.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ConfigurationNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::SavedLimitReached.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::ExternalServiceUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ErrorCode::InternalError.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_code_serializes_as_reason() {
        let json = serde_json::to_string(&ErrorCode::SavedLimitReached).unwrap();
        assert_eq!(json, "\"SAVED_LIMIT_REACHED\"");
    }

    #[test]
    fn test_service_error_creation() {
        let error = ServiceError::new(ErrorCode::InvalidRequest, "Bad request")
            .with_context("field", "model");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Bad request");
        assert_eq!(error.context().len(), 1);
    }

    #[test]
    fn test_to_http_response() {
        let response = ServiceError::unknown_model("Isetta").to_http_response();

        assert_eq!(response.code, "UNKNOWN_MODEL");
        assert_eq!(response.status, 404);
        assert_eq!(response.details["model"], "Isetta");
    }

    #[test]
    fn test_error_display() {
        let error = ServiceError::invalid_request("Missing field");
        assert_eq!(error.to_string(), "[INVALID_REQUEST] Missing field");
    }

    #[test]
    fn test_from_module_errors() {
        let err: ServiceError = SessionError::LimitReached { limit: 3 }.into();
        assert_eq!(err.code(), ErrorCode::SavedLimitReached);

        let err: ServiceError = SessionError::NotFound { index: 7 }.into();
        assert_eq!(err.code(), ErrorCode::ConfigurationNotFound);

        let err: ServiceError = SuggestError::Unavailable.into();
        assert_eq!(err.code(), ErrorCode::ExternalServiceUnavailable);
    }
}
