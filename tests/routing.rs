mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_trailing_slash_redirects() {
    let ctx = common::create_test_state();
    common::insert_record(&ctx.repository, "abcd", "https://example.com/target", None).await;

    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    for path in ["/abcd", "/abcd/"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(response.header("location"), "https://example.com/target");
    }
}

#[tokio::test]
async fn test_api_routes_are_nested() {
    let ctx = common::create_test_state();
    common::insert_record(&ctx.repository, "abcd", "https://example.com", None).await;

    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    let response = server.get("/api/urls/abcd").await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["code"], "abcd");

    let response = server.get("/api/urls/abcd/").await;
    response.assert_status_ok();

    let response = server
        .post("/api/shorten/")
        .json(&json!({ "longUrl": "https://example.com/other" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_api_prefix_is_not_a_code() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    server.get("/api").await.assert_status_not_found();
}

#[tokio::test]
async fn test_health_route_takes_precedence_over_codes() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
}
