//! Gemini client tests against a mock HTTP server.
//!
//! Covers the wire format, retry policy and the `/api/suggest` path end to end
//! with a real [`GeminiClient`] pointed at `wiremock`.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use configurator_service::config::{Config, ServerConfig, SuggestionsConfig};
use configurator_service::suggest::GeneratorError;
use configurator_service::{AppState, Catalog, GeminiClient, TextGenerator, create_router};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

// =============================================================================
// Helpers
// =============================================================================

fn suggestions_config(server: &MockServer) -> SuggestionsConfig {
    SuggestionsConfig {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        max_retries: 1,
        retry_backoff_ms: 5,
        timeout_ms: 2_000,
        ..SuggestionsConfig::default()
    }
}

fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [
            {"content": {"parts": [{"text": text}], "role": "model"}}
        ]
    })
}

const X5_REPLY: &str = r#"Here you go:
```json
{
  "recommended_config": {
    "engine": "B58_3_0T",
    "drivetrain": "xDrive",
    "exterior_color": "Mineral_Grey",
    "interior": "Dakota_Black",
    "packages": ["Premium_Package", "Driver_Assistance_Package"],
    "individual_options": []
  },
  "reasoning": {"overall": "Family road trips favour comfort and safety"},
  "alternatives": {"budget_option": "Drop the Premium Package"},
  "warnings": []
}
```"#;

async fn suggest_via_router(server: &MockServer) -> (StatusCode, Value) {
    let config = Config {
        suggestions: suggestions_config(server),
        ..Config::default()
    };
    let catalog = Arc::new(Catalog::embedded().unwrap());
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(&config.suggestions).unwrap());
    let app = create_router(
        AppState::new(catalog, &config, Some(generator)),
        &ServerConfig::default(),
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/suggest")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"model": "X5", "preferences": "family road trips, safety"}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Client
// =============================================================================

#[tokio::test]
async fn returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({"contents": [{"parts": [{"text": "hello"}]}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&suggestions_config(&server)).unwrap();
    assert_eq!(client.generate("hello").await.unwrap(), "hi there");
}

#[tokio::test]
async fn retries_transient_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("recovered")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&suggestions_config(&server)).unwrap();
    assert_eq!(client.generate("prompt").await.unwrap(), "recovered");
}

#[tokio::test]
async fn gives_up_after_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&suggestions_config(&server)).unwrap();
    let err = client.generate("prompt").await.unwrap_err();
    assert!(matches!(err, GeneratorError::Api { status: 500, .. }), "{err:?}");
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&suggestions_config(&server)).unwrap();
    let err = client.generate("prompt").await.unwrap_err();
    match err {
        GeneratorError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "bad request");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_candidates_are_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&suggestions_config(&server)).unwrap();
    assert!(matches!(
        client.generate("prompt").await,
        Err(GeneratorError::EmptyResponse)
    ));
}

// =============================================================================
// Suggest endpoint
// =============================================================================

#[tokio::test]
async fn suggest_uses_generator_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(X5_REPLY)))
        .mount(&server)
        .await;

    let (status, json) = suggest_via_router(&server).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "ai");
    assert_eq!(json["recommended_config"]["engine"], "B58_3_0T");
    assert_eq!(json["validation"]["valid"], true);
    assert_eq!(json["price_estimate"]["packages"], "4900");
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn suggest_falls_back_on_unparsable_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("no idea, sorry")))
        .mount(&server)
        .await;

    let (status, json) = suggest_via_router(&server).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "fallback");
    assert_eq!(
        json["warnings"][0],
        "AI service temporarily unavailable. Showing default configuration."
    );
}

#[tokio::test]
async fn suggest_falls_back_when_generator_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, json) = suggest_via_router(&server).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "fallback");
    assert!(json["price_estimate"]["total_msrp"].is_string());
}
