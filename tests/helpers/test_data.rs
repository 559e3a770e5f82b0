//! Test data builders
//!
//! JSON payloads shaped like what the web client sends.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Value};

/// RFC 3339 timestamp `days` from now, at a fixed evening hour
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    let base = Utc::now() + Duration::days(days);
    base.date_naive()
        .and_hms_opt(19, 30, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(base)
}

pub fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn occurrence(at: DateTime<Utc>) -> Value {
    json!({
        "starts_at": rfc3339(at),
        "ends_at": rfc3339(at + Duration::hours(2)),
        "timezone": "America/New_York"
    })
}

fn base(title: &str, details: Value, occurrences: &[DateTime<Utc>]) -> Value {
    json!({
        "title": title,
        "description": "An evening of new work by local artists.",
        "contact_name": "Jamie Rivera",
        "contact_email": "jamie@example.org",
        "contact_phone": "+1 (718) 555-0134",
        "website": "https://example.org",
        "details": details,
        "occurrences": occurrences.iter().map(|at| occurrence(*at)).collect::<Vec<_>>()
    })
}

pub fn performance_payload(title: &str, genre: &str, borough: &str, price_cents: Option<i64>, dates: &[DateTime<Utc>]) -> Value {
    base(
        title,
        json!({
            "type": "performance",
            "venue_name": "The Bell House",
            "address": "149 7th St",
            "borough": borough,
            "genre": genre,
            "price_cents": price_cents,
            "is_free": price_cents.is_none(),
        }),
        dates,
    )
}

pub fn class_payload(title: &str, genre: &str, borough: &str, dates: &[DateTime<Utc>]) -> Value {
    base(
        title,
        json!({
            "type": "class",
            "instructor": "Dana Okafor",
            "borough": borough,
            "genre": genre,
            "skill_level": "beginner",
            "price_cents": 2500,
        }),
        dates,
    )
}

pub fn funding_payload(title: &str) -> Value {
    base(
        title,
        json!({
            "type": "funding",
            "organization": "Borough Arts Council",
            "amount_cents": 500000,
            "application_url": "https://arts.example.org/apply",
        }),
        &[],
    )
}

pub fn with_photos(mut payload: Value, paths: &[&str]) -> Value {
    payload["photos"] = paths
        .iter()
        .map(|path| json!({ "storage_path": path, "caption": "Promo still" }))
        .collect::<Vec<_>>()
        .into();
    payload
}

pub fn announcement_payload(title: &str, publish: bool) -> Value {
    json!({
        "title": title,
        "content": "The open call deadline has moved to Friday.",
        "announcement_type": "info",
        "publish": publish
    })
}
