//! Profile and role endpoint tests

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::util::ServiceExt;
use uuid::Uuid;
use ArtistCalendar::models::user::UserRole;

use crate::helpers::*;

#[tokio::test]
async fn test_first_request_provisions_profile() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();
    let token = ctx.token_for(id, "newcomer@artists.test");

    let response = ctx.get("/api/me", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id.to_string());
    assert_eq!(response.body["email"], "newcomer@artists.test");
    assert_eq!(response.body["role"], "user");
    assert_eq!(response.body["artist_status"], "emerging");
}

#[tokio::test]
async fn test_me_requires_session() {
    let ctx = TestContext::new().await;
    assert_eq!(ctx.get("/api/me", None).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_me() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;

    let response = ctx
        .put("/api/me", Some(&artist.token), json!({"name": "Ada Artist", "artist_status": "established"}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Ada Artist");
    assert_eq!(response.body["artist_status"], "established");

    let blank = ctx.put("/api/me", Some(&artist.token), json!({"name": "   "})).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_manages_roles() {
    let ctx = TestContext::new().await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let artist = ctx.sign_in(UserRole::User).await;

    let users = ctx.get("/api/users", Some(&admin.token)).await;
    assert_eq!(users.status, StatusCode::OK);
    assert_eq!(users.body.as_array().unwrap().len(), 2);

    let promoted = ctx
        .put(&format!("/api/users/{}/role", artist.id), Some(&admin.token), json!({"role": "reviewer"}))
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["role"], "reviewer");

    // the new role applies on the next request
    assert_eq!(ctx.get("/api/moderation/queue", Some(&artist.token)).await.status, StatusCode::OK);

    let self_demotion = ctx
        .put(&format!("/api/users/{}/role", admin.id), Some(&admin.token), json!({"role": "user"}))
        .await;
    assert_eq!(self_demotion.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_role_management_is_admin_only() {
    let ctx = TestContext::new().await;
    let reviewer = ctx.sign_in(UserRole::Reviewer).await;

    assert_eq!(ctx.get("/api/users", Some(&reviewer.token)).await.status, StatusCode::FORBIDDEN);
    let response = ctx
        .put(&format!("/api/users/{}/role", reviewer.id), Some(&reviewer.token), json!({"role": "admin"}))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_role_is_bad_request() {
    let ctx = TestContext::new().await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let artist = ctx.sign_in(UserRole::User).await;

    let response = ctx
        .put(&format!("/api/users/{}/role", artist.id), Some(&admin.token), json!({"role": "superuser"}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_role_change_for_unknown_user_is_not_found() {
    let ctx = TestContext::new().await;
    let admin = ctx.sign_in(UserRole::Admin).await;

    let response = ctx
        .put(&format!("/api/users/{}/role", Uuid::new_v4()), Some(&admin.token), json!({"role": "reviewer"}))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;

    let request = Request::builder()
        .uri("/api/me")
        .header(header::COOKIE, format!("theme=dark; sb-access-token={}", artist.token))
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_token_is_rejected_on_optional_auth_routes() {
    let ctx = TestContext::new().await;
    let response = ctx.get("/api/events", Some("not-a-jwt")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
