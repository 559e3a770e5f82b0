//! Moderation endpoint tests

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;
use ArtistCalendar::models::user::UserRole;

use crate::helpers::*;

#[tokio::test]
async fn test_approval_requires_admin() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let reviewer = ctx.sign_in(UserRole::Reviewer).await;
    let id = ctx.submit_event(&artist, funding_payload("Fellowship")).await;
    let uri = format!("/api/events/{}/approve", id);

    let anonymous = ctx.post(&uri, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let member = ctx.post(&uri, Some(&artist.token), None).await;
    assert_eq!(member.status, StatusCode::FORBIDDEN);
    assert_eq!(member.error_code(), Some("FORBIDDEN"));

    let reviewer_attempt = ctx.post(&uri, Some(&reviewer.token), None).await;
    assert_eq!(reviewer_attempt.status, StatusCode::FORBIDDEN);

    let event = ctx.get(&format!("/api/events/{}", id), Some(&artist.token)).await;
    assert_eq!(event.body["status"], "pending");
}

#[tokio::test]
async fn test_approve_creates_exactly_one_review() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let id = ctx.submit_event(&artist, funding_payload("Commission")).await;

    let response = ctx
        .post(
            &format!("/api/events/{}/approve", id),
            Some(&admin.token),
            Some(json!({"notes": "Complete listing"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["event"]["status"], "approved");
    assert_eq!(response.body["review"]["decision"], "approved");
    assert_eq!(response.body["review"]["reviewer_id"], admin.id.to_string());
    assert_eq!(response.body["review"]["notes"], "Complete listing");

    let history = ctx.get(&format!("/api/events/{}/reviews", id), Some(&admin.token)).await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.body.as_array().unwrap().len(), 1);

    // now public
    assert_eq!(ctx.get(&format!("/api/events/{}", id), None).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_repeat_rejection_is_idempotent() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let id = ctx.submit_event(&artist, funding_payload("Duplicate post")).await;
    let uri = format!("/api/events/{}/reject", id);

    let first = ctx.post(&uri, Some(&admin.token), Some(json!({"notes": "Duplicate"}))).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["event"]["status"], "rejected");

    let second = ctx.post(&uri, Some(&admin.token), None).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["event"]["status"], "rejected");
    assert!(second.body["review"].is_null());

    let history = ctx.get(&format!("/api/events/{}/reviews", id), Some(&admin.token)).await;
    assert_eq!(history.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_opposite_decision_conflicts() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let id = ctx.submit_approved_event(&artist, &admin, funding_payload("Approved grant")).await;

    let response = ctx.post(&format!("/api/events/{}/reject", id), Some(&admin.token), None).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("INVALID_STATE_TRANSITION"));
}

#[tokio::test]
async fn test_review_unknown_event() {
    let ctx = TestContext::new().await;
    let admin = ctx.sign_in(UserRole::Admin).await;

    let response = ctx
        .post(&format!("/api/events/{}/approve", Uuid::new_v4()), Some(&admin.token), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_history_visibility() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let reviewer = ctx.sign_in(UserRole::Reviewer).await;
    let id = ctx.submit_event(&artist, funding_payload("History")).await;
    let uri = format!("/api/events/{}/reviews", id);

    assert_eq!(ctx.get(&uri, Some(&reviewer.token)).await.status, StatusCode::OK);
    assert_eq!(ctx.get(&uri, Some(&artist.token)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(ctx.get(&uri, None).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_moderation_queue_and_stats() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let reviewer = ctx.sign_in(UserRole::Reviewer).await;

    ctx.submit_approved_event(&artist, &admin, funding_payload("Done")).await;
    let waiting = ctx.submit_event(&artist, funding_payload("Waiting")).await;

    let queue = ctx.get("/api/moderation/queue", Some(&reviewer.token)).await;
    assert_eq!(queue.status, StatusCode::OK);
    let queue = queue.body.as_array().unwrap().clone();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["id"], waiting.to_string());

    let stats = ctx.get("/api/moderation/stats", Some(&reviewer.token)).await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["events"]["pending"], 1);
    assert_eq!(stats.body["events"]["approved"], 1);

    assert_eq!(
        ctx.get("/api/moderation/queue", Some(&artist.token)).await.status,
        StatusCode::FORBIDDEN
    );
}
