//! Submission to calendar journey

use axum::http::StatusCode;
use serde_json::json;
use ArtistCalendar::models::user::UserRole;

use crate::helpers::*;

#[tokio::test]
async fn test_submission_review_and_publication_journey() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let reviewer = ctx.sign_in(UserRole::Reviewer).await;

    // 1. artist submits two listings
    let showcase = ctx
        .submit_event(
            &artist,
            performance_payload("Fall showcase", "Dance", "Manhattan", Some(1200), &[days_from_now(6)]),
        )
        .await;
    let spam = ctx
        .submit_event(&artist, class_payload("Definitely not spam", "Other", "Queens", &[days_from_now(7)]))
        .await;

    // 2. reviewer sees both in the queue but cannot decide
    let queue = ctx.get("/api/moderation/queue", Some(&reviewer.token)).await;
    assert_eq!(queue.body.as_array().unwrap().len(), 2);
    assert_eq!(
        ctx.post(&format!("/api/events/{}/approve", showcase), Some(&reviewer.token), None).await.status,
        StatusCode::FORBIDDEN
    );

    // 3. admin approves one and rejects the other
    let approved = ctx
        .post(&format!("/api/events/{}/approve", showcase), Some(&admin.token), None)
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    let rejected = ctx
        .post(&format!("/api/events/{}/reject", spam), Some(&admin.token), Some(json!({"notes": "Off topic"})))
        .await;
    assert_eq!(rejected.status, StatusCode::OK);

    // 4. only the approved listing reaches the public surfaces
    let calendar = ctx.get("/api/calendar", None).await;
    let entries = calendar.body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["event_id"], showcase.to_string());

    let listing = ctx.get("/api/events", None).await;
    assert_eq!(listing.body.as_array().unwrap().len(), 1);

    assert_eq!(ctx.get(&format!("/api/events/{}", spam), None).await.status, StatusCode::NOT_FOUND);
    let own_view = ctx.get(&format!("/api/events/{}", spam), Some(&artist.token)).await;
    assert_eq!(own_view.body["status"], "rejected");

    // 5. the queue is empty again
    let queue = ctx.get("/api/moderation/queue", Some(&reviewer.token)).await;
    assert!(queue.body.as_array().unwrap().is_empty());
}
