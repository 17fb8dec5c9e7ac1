/// Integration tests for the HTTP API
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use print_quote::{
    config::ShareConfig,
    handlers::AppState,
    ledger::Ledger,
    pricing::CostModel,
    quote::QuoteService,
    server::create_router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(dir: &tempfile::TempDir) -> Router {
    let model = CostModel {
        printer_cost_per_hour: 2.0,
        filament_cost_per_kg: 100.0,
        energy_cost_per_hour: 0.5,
        profit_margin_percent: 20.0,
    };
    let state = AppState {
        service: Arc::new(QuoteService::new(
            model,
            Ledger::new(dir.path().join("quotes.csv")),
            ShareConfig::default(),
        )),
    };
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    create_router(state, Arc::new(recorder.handle()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(test_app(&dir), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_quote_endpoint_manual() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(
        test_app(&dir),
        post_json(
            "/v1/quote",
            json!({
                "project_name": "Bracket",
                "input": { "source": "manual", "hours": 1.0, "filament_grams": 100.0 }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breakdown"]["total_cost"], 12.5);
    assert_eq!(body["breakdown"]["final_price"], 15.0);
    assert_eq!(body["ledger"]["status"], "not_requested");
}

#[tokio::test]
async fn test_quote_endpoint_saves_and_lists_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        app.clone(),
        post_json(
            "/v1/quote",
            json!({
                "project_name": "Vase",
                "link": "https://example.com/vase",
                "input": { "source": "duration", "duration": "2h30", "filament_grams": 40.0 },
                "save": true
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"]["hours"], 2.5);
    assert_eq!(body["ledger"]["status"], "saved");

    let (status, body) = send(app, get("/v1/ledger")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["project_name"], "Vase");
    assert_eq!(rows[0]["hours"], 2.5);
}

#[tokio::test]
async fn test_quote_endpoint_rejects_bad_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(
        test_app(&dir),
        post_json(
            "/v1/quote",
            json!({ "input": { "source": "duration", "duration": "", "filament_grams": 1.0 } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_duration");
    assert!(body["error"]["message"].as_str().unwrap().contains("2h30"));
}

#[tokio::test]
async fn test_quote_endpoint_gcode_missing_marker() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(
        test_app(&dir),
        post_json(
            "/v1/quote",
            json!({ "input": { "source": "gcode", "gcode": ";Filament used: 3m\n" } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["type"], "missing_metadata");
}

#[tokio::test]
async fn test_gcode_inspect_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/gcode/inspect")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(";TIME_ELAPSED:3600\n;Filament used: 10.0m\n"))
        .unwrap();

    let (status, body) = send(test_app(&dir), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hours"], 1.0);
    assert!((body["filament_grams"].as_f64().unwrap() - 12.4).abs() < 1e-9);
    assert_eq!(body["complete"], true);
}

#[tokio::test]
async fn test_duration_parse_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(
        test_app(&dir),
        post_json("/v1/duration/parse", json!({ "duration": "h30" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hours"], 0.5);
}

#[tokio::test]
async fn test_cost_model_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(test_app(&dir), get("/v1/cost-model")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["printer_cost_per_hour"], 2.0);
    assert_eq!(body["profit_margin_percent"], 20.0);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir).oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
