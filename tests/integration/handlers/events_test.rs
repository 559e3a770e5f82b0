//! Event submission and visibility tests

use axum::http::StatusCode;
use serde_json::json;
use ArtistCalendar::models::user::UserRole;

use crate::helpers::*;

#[tokio::test]
async fn test_submission_with_missing_fields_lists_every_issue() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;

    let response = ctx.post("/api/events", Some(&artist.token), Some(json!({}))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_FAILED"));
    let fields = response.issue_fields();
    for field in ["title", "description", "contact_name", "contact_email", "details"] {
        assert!(fields.contains(&field.to_string()), "missing issue for {}: {:?}", field, fields);
    }
}

#[tokio::test]
async fn test_submission_field_rules() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;

    let mut payload = performance_payload("Late set", "Jazz", "Brooklyn", Some(1500), &[]);
    payload["contact_email"] = json!("not-an-email");
    payload["website"] = json!("ftp://example.org");

    let response = ctx.post("/api/events", Some(&artist.token), Some(payload)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields = response.issue_fields();
    assert!(fields.contains(&"contact_email".to_string()));
    assert!(fields.contains(&"website".to_string()));
    assert!(fields.contains(&"occurrences".to_string()));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;

    let response = ctx
        .post("/api/events", Some(&artist.token), Some(json!({"details": {"type": "rave"}})))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("BAD_REQUEST"));
}

#[tokio::test]
async fn test_submission_requires_session() {
    let ctx = TestContext::new().await;

    let response = ctx.post("/api/events", None, Some(funding_payload("Grant"))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("UNAUTHENTICATED"));

    let forged = ctx.post("/api/events", Some("not.a.jwt"), Some(funding_payload("Grant"))).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_submitted_event_is_pending_and_hidden_from_public() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let stranger = ctx.sign_in(UserRole::User).await;
    let reviewer = ctx.sign_in(UserRole::Reviewer).await;

    let payload = performance_payload("Spring showcase", "Dance", "Queens", Some(2000), &[days_from_now(3)]);
    let response = ctx.post("/api/events", Some(&artist.token), Some(payload)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["status"], "pending");
    assert_eq!(response.body["submitted_by"], artist.id.to_string());

    let id = response.body["id"].as_str().unwrap().to_string();
    let uri = format!("/api/events/{}", id);

    assert_eq!(ctx.get(&uri, None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.get(&uri, Some(&stranger.token)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.get(&uri, Some(&artist.token)).await.status, StatusCode::OK);
    assert_eq!(ctx.get(&uri, Some(&reviewer.token)).await.status, StatusCode::OK);

    let public_list = ctx.get("/api/events", None).await;
    assert_eq!(public_list.status, StatusCode::OK);
    assert!(public_list.body.as_array().unwrap().is_empty());

    let mine = ctx.get("/api/events?mine=true", Some(&artist.token)).await;
    assert_eq!(mine.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_status_filter_requires_moderation_rights() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let reviewer = ctx.sign_in(UserRole::Reviewer).await;
    ctx.submit_event(&artist, funding_payload("Microgrant")).await;

    assert_eq!(ctx.get("/api/events?status=pending", None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        ctx.get("/api/events?status=pending", Some(&artist.token)).await.status,
        StatusCode::FORBIDDEN
    );

    let queue = ctx.get("/api/events?status=pending", Some(&reviewer.token)).await;
    assert_eq!(queue.status, StatusCode::OK);
    assert_eq!(queue.body.as_array().unwrap().len(), 1);

    assert_eq!(
        ctx.get("/api/events?status=archived", Some(&reviewer.token)).await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_owner_edits_only_while_pending() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let other = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;

    let id = ctx.submit_event(&artist, funding_payload("Residency")).await;
    let uri = format!("/api/events/{}", id);

    let edited = ctx.put(&uri, Some(&artist.token), funding_payload("Residency 2025")).await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["title"], "Residency 2025");
    assert_eq!(edited.body["status"], "pending");

    assert_eq!(
        ctx.put(&uri, Some(&other.token), funding_payload("Hijacked")).await.status,
        StatusCode::FORBIDDEN
    );

    ctx.post(&format!("{}/approve", uri), Some(&admin.token), None).await;

    let late = ctx.put(&uri, Some(&artist.token), funding_payload("Too late")).await;
    assert_eq!(late.status, StatusCode::CONFLICT);

    let by_admin = ctx.put(&uri, Some(&admin.token), funding_payload("Fixed by admin")).await;
    assert_eq!(by_admin.status, StatusCode::OK);
    assert_eq!(by_admin.body["status"], "approved");
}

#[tokio::test]
async fn test_delete_is_admin_only() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let id = ctx.submit_event(&artist, funding_payload("Withdrawn")).await;
    let uri = format!("/api/events/{}", id);

    assert_eq!(ctx.delete(&uri, Some(&artist.token)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(ctx.delete(&uri, Some(&admin.token)).await.status, StatusCode::NO_CONTENT);
    assert_eq!(ctx.delete(&uri, Some(&admin.token)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_event_id_is_bad_request() {
    let ctx = TestContext::new().await;
    let response = ctx.get("/api/events/not-a-uuid", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submissions_are_rate_limited() {
    let ctx = TestContext::new_with_config(TestConfig {
        submissions_per_minute: 1,
        submission_burst: 2,
        ..Default::default()
    })
    .await;
    let artist = ctx.sign_in(UserRole::User).await;

    for _ in 0..2 {
        ctx.submit_event(&artist, funding_payload("Open call")).await;
    }

    let response = ctx.post("/api/events", Some(&artist.token), Some(funding_payload("One more"))).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.error_code(), Some("RATE_LIMITED"));
}

#[tokio::test]
async fn test_photo_urls_are_signed() {
    let ctx = TestContext::new_with_config(TestConfig {
        use_storage_mock: true,
        ..Default::default()
    })
    .await;
    let storage = ctx.storage_mock.as_ref().unwrap();
    storage.mock_sign("events/poster.jpg", "abc123").await;

    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let payload = with_photos(
        performance_payload("Gallery night", "Visual", "Bronx", None, &[days_from_now(5)]),
        &["events/poster.jpg"],
    );
    let id = ctx.submit_approved_event(&artist, &admin, payload).await;

    let response = ctx.get(&format!("/api/events/{}/photos", id), None).await;

    assert_eq!(response.status, StatusCode::OK);
    let photos = response.body.as_array().unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(
        photos[0]["url"],
        format!("{}/object/sign/event-photos/events/poster.jpg?token=abc123", storage.uri())
    );
    assert_eq!(photos[0]["caption"], "Promo still");
}

#[tokio::test]
async fn test_photo_signing_failure_is_reported() {
    let ctx = TestContext::new_with_config(TestConfig {
        use_storage_mock: true,
        ..Default::default()
    })
    .await;
    ctx.storage_mock.as_ref().unwrap().mock_sign_failure(500).await;

    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;
    let payload = with_photos(funding_payload("Grant with photo"), &["events/logo.png"]);
    let id = ctx.submit_approved_event(&artist, &admin, payload).await;

    let response = ctx.get(&format!("/api/events/{}/photos", id), None).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.error_code(), Some("STORAGE_ERROR"));
}
