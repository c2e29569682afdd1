mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Duration;
use serde_json::json;

#[tokio::test]
async fn test_redirect_success() {
    let ctx = common::create_test_state();
    common::insert_record(&ctx.repository, "redir1", "https://example.com/target", None).await;

    let server = TestServer::new(common::test_router(ctx.state)).unwrap();
    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_malformed_code_not_found() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    let response = server.get("/not-a-code").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_expired_is_gone() {
    let ctx = common::create_test_state();
    common::insert_record(
        &ctx.repository,
        "old1",
        "https://example.com",
        Some(common::start_time() + Duration::seconds(30)),
    )
    .await;
    ctx.clock.advance(Duration::seconds(30));

    let server = TestServer::new(common::test_router(ctx.state)).unwrap();
    let response = server.get("/old1").await;

    assert_eq!(response.status_code(), StatusCode::GONE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "gone");
    assert_eq!(json["error"]["details"]["code"], "old1");
}

#[tokio::test]
async fn test_create_then_redirect_until_expiry() {
    let ctx = common::create_test_state();
    let clock = ctx.clock.clone();
    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    let created = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/article", "ttlSeconds": 60 }))
        .await
        .json::<serde_json::Value>();
    let path = format!("/{}", created["code"].as_str().unwrap());

    let response = server.get(&path).await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/article");

    clock.advance(Duration::seconds(61));

    let response = server.get(&path).await;
    assert_eq!(response.status_code(), StatusCode::GONE);
}

#[tokio::test]
async fn test_redirect_storage_failure_is_not_404() {
    let ctx = common::create_failing_state();
    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    let response = server.get("/abcd").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
