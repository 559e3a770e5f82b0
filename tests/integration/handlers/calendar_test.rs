//! Calendar endpoint tests

use axum::http::StatusCode;
use chrono::Duration;
use ArtistCalendar::models::user::UserRole;

use crate::helpers::*;

fn titles(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_calendar_shows_only_approved_occurrences_in_range() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;

    ctx.submit_approved_event(
        &artist,
        &admin,
        performance_payload("Approved show", "Jazz", "Brooklyn", Some(1500), &[days_from_now(2), days_from_now(45)]),
    )
    .await;
    ctx.submit_event(
        &artist,
        performance_payload("Pending show", "Jazz", "Brooklyn", Some(1500), &[days_from_now(3)]),
    )
    .await;

    let response = ctx.get("/api/calendar", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Approved show"]);
}

#[tokio::test]
async fn test_calendar_filters_compose() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;

    let day = days_from_now(4);
    ctx.submit_approved_event(&artist, &admin, performance_payload("Jazz BK", "Jazz", "Brooklyn", Some(1000), &[day])).await;
    ctx.submit_approved_event(&artist, &admin, performance_payload("Jazz MN", "jazz", "Manhattan", Some(6000), &[day])).await;
    ctx.submit_approved_event(&artist, &admin, performance_payload("Free theater", "Theater", "Brooklyn", None, &[day])).await;
    ctx.submit_approved_event(&artist, &admin, class_payload("Jazz class", "Jazz", "Brooklyn", &[day + Duration::hours(1)])).await;

    let jazz = ctx.get("/api/calendar?genres=JAZZ&boroughs=brooklyn", None).await;
    assert_eq!(titles(&jazz.body), vec!["Jazz BK", "Jazz class"]);

    let cheap_shows = ctx.get("/api/calendar?types=performance&max_price_cents=2000", None).await;
    let mut cheap = titles(&cheap_shows.body);
    cheap.sort();
    assert_eq!(cheap, vec!["Free theater", "Jazz BK"]);

    let free = ctx.get("/api/calendar?free_only=true", None).await;
    assert_eq!(titles(&free.body), vec!["Free theater"]);
}

#[tokio::test]
async fn test_calendar_explicit_range_and_sorting() {
    let ctx = TestContext::new().await;
    let artist = ctx.sign_in(UserRole::User).await;
    let admin = ctx.sign_in(UserRole::Admin).await;

    ctx.submit_approved_event(
        &artist,
        &admin,
        class_payload("Weekly class", "Dance", "Queens", &[days_from_now(70), days_from_now(63), days_from_now(90)]),
    )
    .await;

    let uri = format!(
        "/api/calendar?start={}&end={}",
        rfc3339(days_from_now(60)),
        rfc3339(days_from_now(80))
    );
    let response = ctx.get(&uri, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let entries = response.body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0]["starts_at"].as_str().unwrap() < entries[1]["starts_at"].as_str().unwrap());
}

#[tokio::test]
async fn test_calendar_rejects_bad_ranges_and_types() {
    let ctx = TestContext::new().await;

    let too_long = format!(
        "/api/calendar?start={}&end={}",
        rfc3339(days_from_now(0)),
        rfc3339(days_from_now(400))
    );
    assert_eq!(ctx.get(&too_long, None).await.status, StatusCode::BAD_REQUEST);

    let backwards = format!(
        "/api/calendar?start={}&end={}",
        rfc3339(days_from_now(10)),
        rfc3339(days_from_now(1))
    );
    assert_eq!(ctx.get(&backwards, None).await.status, StatusCode::BAD_REQUEST);

    let unknown_type = ctx.get("/api/calendar?types=rave", None).await;
    assert_eq!(unknown_type.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_type.issue_fields(), vec!["types"]);
}

#[tokio::test]
async fn test_calendar_far_future_start_is_validation_error() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/api/calendar?start=%2B262142-12-31T00:00:00Z", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_FAILED"));
    assert_eq!(response.issue_fields(), vec!["start"]);
}
