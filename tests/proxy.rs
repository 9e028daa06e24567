//! End-to-end requests through the router and the real HubSpot client.
//!
//! Run with: cargo test --test proxy

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use common::{closed_base_url, FakeHubSpot};
use hubspot_language_proxy::config::HubSpotConfig;
use hubspot_language_proxy::hubspot::HubSpotClient;
use hubspot_language_proxy::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn proxy(base_url: &str, token: Option<&str>) -> Router {
    let hubspot = HubSpotConfig {
        api_base_url: base_url.to_string(),
        request_timeout_seconds: 5,
        access_token: token.map(str::to_string),
    };
    let client = HubSpotClient::new(&hubspot).unwrap();
    create_router(AppState::new(&hubspot, Arc::new(client)))
}

async fn update(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/update-contact-language")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_update_round_trip() {
    let fake = FakeHubSpot::start(200, r#"{"id":"123"}"#).await;

    let (status, body) = update(
        proxy(&fake.base_url, Some("pat-test")),
        json!({"email": "a@b.com", "language": "fr"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["contactId"], "123");
    assert_eq!(body["data"]["email"], "a@b.com");
    assert_eq!(body["data"]["language"], "fr");
    assert!(body["data"]["responseTime"].as_u64().is_some());

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer pat-test"));
}

#[tokio::test]
async fn test_rate_limit_passes_through() {
    let fake = FakeHubSpot::start(429, r#"{"status":"error","category":"RATE_LIMITS"}"#).await;

    let (status, body) = update(
        proxy(&fake.base_url, Some("pat-test")),
        json!({"email": "a@b.com", "language": "en"}),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "RATE_LIMIT_EXCEEDED");
    // A single attempt, no retry
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn test_upstream_server_error() {
    let fake = FakeHubSpot::start(502, "{}").await;

    let (status, body) = update(
        proxy(&fake.base_url, Some("pat-test")),
        json!({"email": "a@b.com", "language": "en"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "HUBSPOT_API_ERROR");
    assert_eq!(body["message"], "HubSpot API error: 502");
}

#[tokio::test]
async fn test_unreachable_hubspot_is_internal_error() {
    let (status, body) = update(
        proxy(&closed_base_url().await, Some("pat-test")),
        json!({"email": "a@b.com", "language": "fr"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert_eq!(body["message"], "Unexpected error occurred");
}

#[tokio::test]
async fn test_missing_token_never_calls_hubspot() {
    let fake = FakeHubSpot::start(200, r#"{"id":"123"}"#).await;

    let (status, body) = update(
        proxy(&fake.base_url, None),
        json!({"email": "a@b.com", "language": "fr"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "CONFIGURATION_ERROR");
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_input_never_calls_hubspot() {
    let fake = FakeHubSpot::start(200, r#"{"id":"123"}"#).await;

    let (status, body) = update(
        proxy(&fake.base_url, Some("pat-test")),
        json!({"email": "a@b.com", "language": "de"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_LANGUAGE");
    assert!(fake.requests().is_empty());
}
