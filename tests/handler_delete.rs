mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use shortlink::api::dto::delete::DeleteResponse;
use shortlink::domain::repositories::UrlRepository;

const SHORT: &str = "http://localhost/abc123";
const LONG: &str = "https://example.com/target";

#[tokio::test]
async fn test_delete_success() {
    let ctx = common::create_test_context();
    ctx.repo.save(SHORT, LONG).await.unwrap();
    ctx.cache.insert(SHORT, LONG);
    let server = TestServer::new(common::create_test_router(ctx.state.clone())).unwrap();

    let response = server.delete("/url/abc123").await;

    response.assert_status_ok();
    let body = response.json::<DeleteResponse>();
    assert_eq!(body.message, "URL deleted successfully");
    assert_eq!(body.deleted_url, LONG);

    assert!(ctx.repo.is_empty());
    assert!(ctx.cache.peek(SHORT).is_none());
}

#[tokio::test]
async fn test_delete_then_redirect_is_not_found() {
    let ctx = common::create_test_context();
    ctx.repo.save(SHORT, LONG).await.unwrap();
    ctx.cache.insert(SHORT, LONG);
    let server = TestServer::new(common::create_test_router(ctx.state.clone())).unwrap();

    server.delete("/url/abc123").await.assert_status_ok();

    server.get("/abc123").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_not_found_leaves_cache_untouched() {
    let ctx = common::create_test_context();
    ctx.cache.insert(SHORT, LONG);
    let server = TestServer::new(common::create_test_router(ctx.state.clone())).unwrap();

    let response = server.delete("/url/abc123").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(ctx.cache.peek(SHORT).as_deref(), Some(LONG));
}

#[tokio::test]
async fn test_delete_with_store_down_leaves_cache_untouched() {
    let (state, cache) = common::create_unavailable_store_state();
    cache.insert(SHORT, LONG);
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server.delete("/url/abc123").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["details"]["operation"], "delete");
    assert_eq!(cache.peek(SHORT).as_deref(), Some(LONG));
}

#[tokio::test]
async fn test_delete_with_cache_down_still_succeeds() {
    let (state, repo) = common::create_failing_cache_state();
    repo.save(SHORT, LONG).await.unwrap();
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server.delete("/url/abc123").await;

    response.assert_status_ok();
    assert_eq!(response.json::<DeleteResponse>().deleted_url, LONG);
    assert!(repo.is_empty());
}
