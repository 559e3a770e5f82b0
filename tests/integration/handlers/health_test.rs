//! Health endpoint tests

use axum::http::StatusCode;

use crate::helpers::*;

#[tokio::test]
async fn test_health_with_in_memory_store() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "memory");
    assert_eq!(response.body["storage_enabled"], false);
    assert_eq!(response.body["version"], ArtistCalendar::VERSION);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let ctx = TestContext::new().await;
    assert_eq!(ctx.get("/api/nowhere", None).await.status, StatusCode::NOT_FOUND);
}
