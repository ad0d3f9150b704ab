//! `/bfhl` contract tests driven through the router without a socket.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use bfhl_service::services::providers::mock::MockTextProvider;
use bfhl_service::services::providers::FALLBACK_ANSWER;
use bfhl_service::startup::build_router;
use common::{test_state, TEST_EMAIL};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn app_with(provider: MockTextProvider) -> Router {
    build_router(test_state(Arc::new(provider)))
}

fn app() -> Router {
    app_with(MockTextProvider::replying("Pune is a city in Maharashtra."))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/bfhl")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn assert_failure(status: StatusCode, body: &Value, error: &str) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["is_success"], false);
    assert_eq!(body["official_email"], TEST_EMAIL);
    assert_eq!(body["error"], error);
    assert!(body.get("data").is_none());
}

fn assert_success(status: StatusCode, body: &Value, data: Value) {
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_success"], true);
    assert_eq!(body["official_email"], TEST_EMAIL);
    assert_eq!(body["data"], data);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn fibonacci_returns_series() {
    let (status, body) = post_json(app(), json!({"fibonacci": 5})).await;
    assert_success(status, &body, json!([0, 1, 1, 2, 3]));

    let (status, body) = post_json(app(), json!({"fibonacci": 1})).await;
    assert_success(status, &body, json!([0]));

    let (status, body) = post_json(app(), json!({"fibonacci": -4})).await;
    assert_success(status, &body, json!([]));
}

#[tokio::test]
async fn fibonacci_rejects_string() {
    let (status, body) = post_json(app(), json!({"fibonacci": "5"})).await;
    assert_failure(status, &body, "Invalid fibonacci input");
}

#[tokio::test]
async fn fibonacci_past_u64_keeps_every_digit() {
    let (status, body) = post_json(app(), json!({"fibonacci": 95})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_success"], true);
    let series = body["data"].as_array().unwrap();
    assert_eq!(series.len(), 95);
    assert_eq!(series[94].to_string(), "19740274219868223167");
}

#[tokio::test]
async fn fibonacci_term_limit_is_enforced() {
    let (status, body) = post_json(app(), json!({"fibonacci": 5000})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5000));

    let (status, body) = post_json(app(), json!({"fibonacci": 5001})).await;
    assert_failure(status, &body, "fibonacci input exceeds the 5000 term limit");
}

#[tokio::test]
async fn prime_keeps_candidates_above_i64() {
    let (status, body) =
        post_json(app(), json!({"prime": [18_446_744_073_709_551_557u64, 3]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].to_string(), "[18446744073709551557,3]");
}

#[tokio::test]
async fn prime_filters_in_order() {
    let (status, body) = post_json(app(), json!({"prime": [1, 2, 3, 4, 5, 9]})).await;
    assert_success(status, &body, json!([2, 3, 5]));

    let (status, body) = post_json(app(), json!({"prime": [11, "13", 4.5, 7]})).await;
    assert_success(status, &body, json!([11, 7]));

    let (status, body) = post_json(app(), json!({"prime": 7})).await;
    assert_failure(status, &body, "Invalid prime input");
}

#[tokio::test]
async fn lcm_and_hcf_fold_the_list() {
    let (status, body) = post_json(app(), json!({"lcm": [4, 6, 8]})).await;
    assert_success(status, &body, json!(24));

    let (status, body) = post_json(app(), json!({"hcf": [12, 18, 24]})).await;
    assert_success(status, &body, json!(6));
}

#[tokio::test]
async fn lcm_and_hcf_reject_empty_lists() {
    let (status, body) = post_json(app(), json!({"lcm": []})).await;
    assert_failure(status, &body, "Invalid lcm input");

    let (status, body) = post_json(app(), json!({"hcf": []})).await;
    assert_failure(status, &body, "Invalid hcf input");
}

#[tokio::test]
async fn ai_returns_first_word() {
    let (status, body) = post_json(app(), json!({"AI": "Name a city in Maharashtra"})).await;
    assert_success(status, &body, json!("Pune"));
}

#[tokio::test]
async fn ai_failure_is_invisible_to_caller() {
    let app = app_with(MockTextProvider::new(false));
    let (status, body) = post_json(app, json!({"AI": "What is the capital of Maharashtra?"})).await;
    assert_success(status, &body, json!(FALLBACK_ANSWER));
}

#[tokio::test]
async fn ai_rejects_non_string() {
    let (status, body) = post_json(app(), json!({"AI": ["hello"]})).await;
    assert_failure(status, &body, "Invalid AI input");
}

#[tokio::test]
async fn two_keys_are_rejected() {
    let (status, body) = post_json(app(), json!({"fibonacci": 5, "prime": [2, 3]})).await;
    assert_failure(status, &body, "Request must contain exactly one key");
}

#[tokio::test]
async fn empty_object_and_array_bodies_are_rejected() {
    let (status, body) = post_json(app(), json!({})).await;
    assert_failure(status, &body, "Request must contain exactly one key");

    let (status, body) = post_json(app(), json!([{"fibonacci": 5}])).await;
    assert_failure(status, &body, "Request must contain exactly one key");
}

#[tokio::test]
async fn unknown_key_is_rejected() {
    let (status, body) = post_json(app(), json!({"foo": 1})).await;
    assert_failure(status, &body, "Invalid key");
}

#[tokio::test]
async fn malformed_json_uses_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/bfhl")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"fibonacci\": "))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["is_success"], false);
    assert_eq!(body["official_email"], TEST_EMAIL);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn missing_content_type_uses_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/bfhl")
        .body(Body::from(json!({"fibonacci": 5}).to_string()))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["is_success"], false);
}

#[tokio::test]
async fn health_reports_configured_email() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"is_success": true, "official_email": TEST_EMAIL}));
}

#[tokio::test]
async fn unknown_path_is_404() {
    let request = Request::builder()
        .uri("/does-not-exist")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No route for /does-not-exist");
}
