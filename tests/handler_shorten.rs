mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use shortlink::api::dto::shorten::ShortenResponse;
use std::sync::Arc;

#[tokio::test]
async fn test_shorten_url_success() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::create_test_router(ctx.state.clone())).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com/some/page" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<ShortenResponse>();
    let key = common::key_of(&body.short_url);
    assert_eq!(key.len(), 6);
    assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));

    // Both stores hold the mapping after a successful create
    assert_eq!(ctx.repo.len(), 1);
    assert_eq!(
        ctx.cache.peek(&body.short_url).as_deref(),
        Some("https://example.com/some/page")
    );
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_distinct_short_urls() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::create_test_router(ctx.state.clone())).unwrap();

    let first = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com" }))
        .await
        .json::<ShortenResponse>();
    let second = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com" }))
        .await
        .json::<ShortenResponse>();

    assert_ne!(first.short_url, second.short_url);
    assert_eq!(ctx.repo.len(), 2);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::create_test_router(ctx.state.clone())).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "not-a-valid-url" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Validation failed");
    assert!(ctx.repo.is_empty());
}

#[tokio::test]
async fn test_shorten_missing_field() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::create_test_router(ctx.state)).unwrap();

    let response = server.post("/shorten").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Invalid request body");
}

#[tokio::test]
async fn test_shorten_malformed_body() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::create_test_router(ctx.state)).unwrap();

    let response = server.post("/shorten").text("long_url=https://example.com").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_key_collision_is_internal_error() {
    let ctx = common::create_test_context_with_keys(Arc::new(common::FixedKeyGenerator("abc123")));
    let server = TestServer::new(common::create_test_router(ctx.state.clone())).unwrap();

    server
        .post("/shorten")
        .json(&json!({ "long_url": "https://first.example.com" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://second.example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["details"]["operation"], "save");

    // The existing mapping is untouched in both stores
    assert_eq!(
        ctx.cache.peek("http://localhost/abc123").as_deref(),
        Some("https://first.example.com")
    );
}

#[tokio::test]
async fn test_shorten_with_store_down_returns_500() {
    let (state, cache) = common::create_unavailable_store_state();
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Internal server error");
    assert!(
        !json.to_string().contains("connection refused"),
        "store error details must not leak"
    );
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_shorten_succeeds_when_cache_is_down() {
    let (state, repo) = common::create_failing_cache_state();
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(repo.len(), 1);
}
