//! HTTP API integration tests.
//!
//! Drives the full router (catalog → engines → JSON) with `oneshot` requests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use configurator_service::config::{Config, ServerConfig, SessionsConfig};
use configurator_service::server::SESSION_HEADER;
use configurator_service::{AppState, Catalog, create_router};

// =============================================================================
// Helpers
// =============================================================================

fn app_with(config: &Config) -> Router {
    let catalog = Arc::new(Catalog::embedded().unwrap());
    create_router(AppState::new(catalog, config, None), &ServerConfig::default())
}

fn app() -> Router {
    app_with(&Config::default())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_session(mut request: Request<Body>, session: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(SESSION_HEADER, session.parse().unwrap());
    request
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// =============================================================================
// Catalog endpoints
// =============================================================================

#[tokio::test]
async fn lists_series() {
    let (status, json) = send(&app(), get("/api/series")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"SUVs"), "{names:?}");
}

#[tokio::test]
async fn series_models_mark_configurable_entries() {
    let (status, json) = send(&app(), get("/api/series/SUVs")).await;
    assert_eq!(status, StatusCode::OK);

    let models = json["models"].as_array().unwrap();
    let x1 = models.iter().find(|m| m["name"] == "X1").unwrap();
    assert_eq!(x1["configurable"], true);
    let x2 = models.iter().find(|m| m["name"] == "X2").unwrap();
    assert_eq!(x2["configurable"], false);
}

#[tokio::test]
async fn unknown_series_is_404() {
    let (status, json) = send(&app(), get("/api/series/Trucks")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "UNKNOWN_SERIES");
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn model_details_include_description() {
    let (status, json) = send(&app(), get("/api/models/3%20Series")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["code"], "3 Series");
    assert!(json["description"].as_str().unwrap().len() > 10);

    let (status, json) = send(&app(), get("/api/models/M5")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["description"].is_string());
}

#[tokio::test]
async fn unknown_model_details_is_404() {
    let (status, json) = send(&app(), get("/api/models/Isetta")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "UNKNOWN_MODEL");
    assert_eq!(json["details"]["model"], "Isetta");
}

#[tokio::test]
async fn options_for_unknown_model_are_empty() {
    let (status, json) = send(&app(), get("/api/options/Isetta")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["engines"].as_array().unwrap().is_empty());
    assert!(json["packages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn options_are_filtered_to_the_model() {
    let (_, json) = send(&app(), get("/api/options/i4")).await;
    let engines: Vec<&str> = json["engines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap())
        .collect();
    assert!(engines.iter().all(|e| e.starts_with("Electric")), "{engines:?}");
    assert_eq!(
        json["constraints"]["model_specific"]["required_options"],
        json!(["Electric_Charging_Package"])
    );
}

// =============================================================================
// Validation and pricing
// =============================================================================

#[tokio::test]
async fn x3_v8_rwd_is_incompatible() {
    let body = json!({
        "model": "X3",
        "configuration": {"engine": "N63_4_4T_V8", "drivetrain": "RWD"}
    });
    let (status, json) = send(&app(), post("/api/validate-configuration", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], false);
    let issue = &json["errors"][0];
    assert_eq!(issue["kind"], "engine_drivetrain_incompatible");
    assert_eq!(issue["allowed"], json!(["xDrive"]));
}

#[tokio::test]
async fn m3_requires_m_sport_and_tires() {
    let body = json!({"model": "M3", "configuration": {}});
    let (_, json) = send(&app(), post("/api/validate-configuration", &body)).await;

    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0]["kind"], "model_required_options");
    assert_eq!(
        json["errors"][0]["codes"],
        json!(["M_Sport_Package", "Performance_Tires"])
    );
}

#[tokio::test]
async fn flags_accept_loose_truthiness() {
    let body = json!({
        "model": "5 Series",
        "configuration": {"Sunroof": 1, "Carbon_Fiber_Roof": "yes", "Heated_Seats": 0}
    });
    let (_, json) = send(&app(), post("/api/validate-configuration", &body)).await;
    assert_eq!(json["errors"][0]["kind"], "incompatible_options");
}

#[tokio::test]
async fn x1_premium_price() {
    let body = json!({"model": "X1", "configuration": {"Premium_Package": true}});
    let (status, json) = send(&app(), post("/api/calculate-price", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["base_price"], "37500");
    assert_eq!(json["packages"], "3200");
    assert_eq!(json["package_discount"], "0");
    assert_eq!(json["total_msrp"], "41695");
    assert_eq!(json["estimated_tax"], "3335.60");
}

#[tokio::test]
async fn combo_discounts_are_itemized() {
    let body = json!({
        "model": "X3",
        "configuration": {
            "Premium_Package": true,
            "Technology_Package": true,
            "Cold_Weather_Package": true
        }
    });
    let (_, json) = send(&app(), post("/api/calculate-price", &body)).await;

    let discounts = json["discounts"].as_array().unwrap();
    assert_eq!(discounts.len(), 2);
    assert_eq!(discounts[0]["kind"], "premium_technology");
    assert_eq!(discounts[1]["kind"], "multi_package");
    assert_eq!(json["package_discount"], "700");
}

#[tokio::test]
async fn missing_configuration_prices_base_model() {
    let (status, json) = send(&app(), post("/api/calculate-price", &json!({"model": "i4"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["subtotal"], json["base_price"]);
}

// =============================================================================
// Suggestions without a generator
// =============================================================================

#[tokio::test]
async fn suggest_without_generator_is_503() {
    let body = json!({"model": "X5", "preferences": "family road trips"});
    let (status, json) = send(&app(), post("/api/suggest", &body)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "EXTERNAL_SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn suggest_unknown_model_is_404_even_without_generator() {
    let body = json!({"model": "Isetta", "preferences": "tiny"});
    let (status, _) = send(&app(), post("/api/suggest", &body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn suggest_requires_preferences() {
    let body = json!({"model": "X5", "preferences": "  "});
    let (status, json) = send(&app(), post("/api/suggest", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn compare_without_generator_prices_both_sides() {
    let body = json!({
        "model": "X1",
        "config1": {},
        "config2": {"Premium_Package": true}
    });
    let (status, json) = send(&app(), post("/api/compare", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price_difference"], "3456.00");
    assert!(json["narrative"].is_null());
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Saved configurations
// =============================================================================

#[tokio::test]
async fn saved_configuration_round_trip() {
    let app = app();

    let save = json!({
        "name": "Weekend",
        "configuration": {"model": "M3", "M_Sport_Package": true}
    });
    let (status, json) = send(&app, post("/api/configurations", &save)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["index"], 0);
    assert_eq!(json["configuration"]["model"], "M3");
    let session = json["session_id"].as_str().unwrap().to_string();

    let save = json!({"model": "X5", "configuration": {"Premium_Package": true}});
    let (_, json) = send(&app, with_session(post("/api/configurations", &save), &session)).await;
    assert_eq!(json["index"], 1);
    assert_eq!(json["configuration"]["name"], "Untitled Configuration");

    let (_, json) = send(&app, with_session(get("/api/configurations"), &session)).await;
    assert_eq!(json["configurations"].as_array().unwrap().len(), 2);

    let (status, json) = send(&app, with_session(get("/api/configurations/1"), &session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["model"], "X5");

    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/configurations/0")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, with_session(delete, &session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Weekend");

    let (_, json) = send(&app, with_session(get("/api/configurations/0"), &session)).await;
    assert_eq!(json["model"], "X5");
}

#[tokio::test]
async fn out_of_range_index_is_404() {
    let app = app();
    let (_, json) = send(&app, post("/api/configurations", &json!({"configuration": {}}))).await;
    let session = json["session_id"].as_str().unwrap().to_string();

    let (status, json) = send(&app, with_session(get("/api/configurations/3"), &session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "CONFIGURATION_NOT_FOUND");
}

#[tokio::test]
async fn load_without_session_is_404() {
    let (status, _) = send(&app(), get("/api/configurations/0")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_without_session_is_empty() {
    let (status, json) = send(&app(), get("/api/configurations")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["configurations"].as_array().unwrap().is_empty());
    assert!(json.get("session_id").is_none());
}

#[tokio::test]
async fn session_capacity_is_409() {
    let config = Config {
        sessions: SessionsConfig {
            max_saved: 1,
            ..SessionsConfig::default()
        },
        ..Config::default()
    };
    let app = app_with(&config);

    let (_, json) = send(&app, post("/api/configurations", &json!({"configuration": {}}))).await;
    let session = json["session_id"].as_str().unwrap().to_string();

    let request = with_session(post("/api/configurations", &json!({"configuration": {}})), &session);
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "SAVED_LIMIT_REACHED");
}
