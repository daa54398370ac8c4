//! Route table and handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::request::{
    CompareRequest, ConfigurationRequest, SaveConfigurationRequest, SuggestRequest,
};
use super::response::{
    HealthResponse, SaveConfigurationResponse, SavedConfigurationsResponse, SeriesModelsResponse,
};
use crate::catalog::Catalog;
use crate::config::{Config, ServerConfig};
use crate::error::ServiceError;
use crate::models::{
    Comparison, Model, OptionSet, PriceBreakdown, SavedConfiguration, Series, Suggestion,
    ValidationResult,
};
use crate::pricing::PriceCalculator;
use crate::rules::ConfigurationValidator;
use crate::session::{SessionError, SessionStore};
use crate::suggest::{SuggestError, SuggestionService, TextGenerator};

/// Header carrying the saved-configuration session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded catalog.
    pub catalog: Arc<Catalog>,
    /// Configuration validator.
    pub validator: ConfigurationValidator,
    /// Price calculator.
    pub calculator: PriceCalculator,
    /// AI suggestion service.
    pub suggestions: SuggestionService,
    /// Saved configurations.
    pub sessions: Arc<SessionStore>,
    /// Prometheus handle; `None` when no recorder is installed.
    pub metrics: Option<PrometheusHandle>,
    /// Service version.
    pub version: String,
}

impl AppState {
    /// Wire the engines together from config.
    ///
    /// `generator` is `None` when AI suggestions are disabled.
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        config: &Config,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        let validator = ConfigurationValidator::new(Arc::clone(&catalog));
        let calculator = PriceCalculator::new(Arc::clone(&catalog), config.pricing.clone());
        let suggestions = SuggestionService::new(
            Arc::clone(&catalog),
            validator.clone(),
            calculator.clone(),
            generator,
        );

        Self {
            catalog,
            validator,
            calculator,
            suggestions,
            sessions: Arc::new(SessionStore::new(&config.sessions)),
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Attach the Prometheus handle rendered by `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the Axum router with all endpoints.
#[must_use]
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .route("/api/series", get(list_series))
        .route("/api/series/{series}", get(series_models))
        .route("/api/models/{model}", get(model_details))
        .route("/api/options/{model}", get(model_options))
        .route("/api/validate-configuration", post(validate_configuration))
        .route("/api/calculate-price", post(calculate_price))
        .route("/api/suggest", post(suggest))
        .route("/api/compare", post(compare))
        .route(
            "/api/configurations",
            get(list_configurations).post(save_configuration),
        )
        .route(
            "/api/configurations/{index}",
            get(load_configuration).delete(delete_configuration),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if server.permissive_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

// ============================================================================
// Service
// ============================================================================

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        models: state.catalog.models().len(),
        ai_enabled: state.suggestions.is_available(),
    })
}

/// Prometheus exposition endpoint.
async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}

// ============================================================================
// Catalog
// ============================================================================

async fn list_series(State(state): State<AppState>) -> Json<Vec<Series>> {
    Json(state.catalog.series().to_vec())
}

async fn series_models(
    State(state): State<AppState>,
    Path(series): Path<String>,
) -> Result<Json<SeriesModelsResponse>, ApiError> {
    let models = state
        .catalog
        .models_for_series(&series)
        .ok_or_else(|| ServiceError::unknown_series(&series))?;

    Ok(Json(SeriesModelsResponse { series, models }))
}

async fn model_details(
    State(state): State<AppState>,
    Path(model): Path<String>,
) -> Result<Json<Model>, ApiError> {
    let entry = state
        .catalog
        .get_model(&model)
        .ok_or_else(|| ServiceError::unknown_model(&model))?;

    let mut details = entry.clone();
    details.description = Some(entry.description());
    Ok(Json(details))
}

/// Options for a model; unknown models get an empty set.
async fn model_options(State(state): State<AppState>, Path(model): Path<String>) -> Json<OptionSet> {
    Json(state.catalog.get_options_for_model(&model))
}

// ============================================================================
// Engine
// ============================================================================

async fn validate_configuration(
    State(state): State<AppState>,
    payload: Result<Json<ConfigurationRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
    let req = json_body(payload)?;
    tracing::info!(model = %req.model, options = req.configuration.len(), "Validating configuration");

    Ok(Json(state.validator.validate(&req.model, &req.configuration)))
}

async fn calculate_price(
    State(state): State<AppState>,
    payload: Result<Json<ConfigurationRequest>, JsonRejection>,
) -> Result<Json<PriceBreakdown>, ApiError> {
    let req = json_body(payload)?;
    tracing::info!(model = %req.model, options = req.configuration.len(), "Calculating price");

    Ok(Json(state.calculator.calculate_price(&req.model, &req.configuration)))
}

// ============================================================================
// Suggestions
// ============================================================================

async fn suggest(
    State(state): State<AppState>,
    payload: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<Suggestion>, ApiError> {
    let req = json_body(payload)?;
    if req.model.trim().is_empty() || req.preferences.trim().is_empty() {
        return Err(ServiceError::invalid_request("Missing preferences or model name").into());
    }

    let suggestion = state
        .suggestions
        .suggest(&req.model, &req.preferences, &req.current_config)
        .await?;
    Ok(Json(suggestion))
}

async fn compare(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<Comparison>, ApiError> {
    let req = json_body(payload)?;
    if req.model.trim().is_empty() {
        return Err(ServiceError::invalid_request("Missing model name").into());
    }

    let comparison = state
        .suggestions
        .compare(&req.model, req.config1, req.config2)
        .await?;
    Ok(Json(comparison))
}

// ============================================================================
// Saved configurations
// ============================================================================

async fn list_configurations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SavedConfigurationsResponse>, ApiError> {
    let session_id = session_id(&headers)?;
    let configurations = match session_id {
        Some(id) => state.sessions.list(id).await,
        None => Vec::new(),
    };

    Ok(Json(SavedConfigurationsResponse {
        session_id,
        configurations,
    }))
}

async fn save_configuration(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SaveConfigurationRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let session = session_id(&headers)?;
    let req = json_body(payload)?;

    let saved = SavedConfiguration::new(req.name, req.model, req.configuration);
    let (session_id, index) = state.sessions.save(session, saved.clone()).await?;
    tracing::info!(
        session = %session_id,
        index,
        model = %saved.model,
        "Configuration saved"
    );

    let mut response = (
        StatusCode::CREATED,
        Json(SaveConfigurationResponse {
            session_id,
            index,
            configuration: saved,
        }),
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&session_id.to_string()) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    Ok(response)
}

async fn load_configuration(
    State(state): State<AppState>,
    headers: HeaderMap,
    index: Result<Path<usize>, PathRejection>,
) -> Result<Json<SavedConfiguration>, ApiError> {
    let index = path_index(index)?;
    let session = session_id(&headers)?.ok_or_else(|| ServiceError::configuration_not_found(index))?;

    Ok(Json(state.sessions.load(session, index).await?))
}

async fn delete_configuration(
    State(state): State<AppState>,
    headers: HeaderMap,
    index: Result<Path<usize>, PathRejection>,
) -> Result<Json<SavedConfiguration>, ApiError> {
    let index = path_index(index)?;
    let session = session_id(&headers)?.ok_or_else(|| ServiceError::configuration_not_found(index))?;

    let removed = state.sessions.delete(session, index).await?;
    tracing::info!(session = %session, index, "Configuration deleted");
    Ok(Json(removed))
}

// ============================================================================
// Extraction helpers
// ============================================================================

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ServiceError::invalid_request(e.body_text()).into())
}

fn path_index(index: Result<Path<usize>, PathRejection>) -> Result<usize, ApiError> {
    index
        .map(|Path(i)| i)
        .map_err(|e| ServiceError::invalid_request(e.body_text()).with_context("field", "index").into())
}

/// Session id from the request headers; absent is fine, malformed is not.
fn session_id(headers: &HeaderMap) -> Result<Option<Uuid>, ApiError> {
    let Some(value) = headers.get(SESSION_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .map(Some)
        .ok_or_else(|| {
            ServiceError::invalid_request("Invalid session id")
                .with_context("header", SESSION_HEADER)
                .into()
        })
}

// ============================================================================
// Errors
// ============================================================================

/// API error type with rich error details.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl ApiError {
    /// The wrapped service error.
    #[must_use]
    pub const fn inner(&self) -> &ServiceError {
        &self.0
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        Self(error)
    }
}

impl From<SuggestError> for ApiError {
    fn from(error: SuggestError) -> Self {
        Self(error.into())
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.code().http_status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        (status, Json(self.0.to_http_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn make_app() -> Router {
        let catalog = Arc::new(Catalog::embedded().unwrap());
        let state = AppState::new(catalog, &Config::default(), None);
        create_router(state, &ServerConfig::default())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = make_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["ai_enabled"], false);
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let response = make_app()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_request() {
        let response = make_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/validate-configuration")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_malformed_session_header() {
        let response = make_app()
            .oneshot(
                Request::builder()
                    .uri("/api/configurations")
                    .header(SESSION_HEADER, "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_index() {
        let response = make_app()
            .oneshot(
                Request::builder()
                    .uri("/api/configurations/first")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["details"]["field"], "index");
    }
}
