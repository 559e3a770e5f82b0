//! Calendar query and entry models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use super::event::{Event, EventType, Occurrence};

/// Query string accepted by the calendar endpoint
///
/// List-valued filters are comma separated, e.g. `types=performance,class`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarParams {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub types: Option<String>,
    pub genres: Option<String>,
    pub boroughs: Option<String>,
    #[serde(default)]
    pub free_only: bool,
    pub max_price_cents: Option<i64>,
}

/// Resolved calendar query with defaults applied
#[derive(Debug, Clone)]
pub struct CalendarQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub types: Vec<EventType>,
    pub genres: Vec<String>,
    pub boroughs: Vec<String>,
    pub free_only: bool,
    pub max_price_cents: Option<i64>,
}

/// One occurrence of an approved event, as shown on the calendar
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub event_id: Uuid,
    pub occurrence_id: Uuid,
    pub event_type: EventType,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub timezone: String,
    pub genre: Option<String>,
    pub borough: Option<String>,
    pub price_cents: Option<i64>,
    pub is_free: bool,
}

impl CalendarEntry {
    pub fn new(event: &Event, occurrence: &Occurrence) -> Self {
        Self {
            event_id: event.id,
            occurrence_id: occurrence.id,
            event_type: event.event_type,
            title: event.title.clone(),
            starts_at: occurrence.starts_at,
            ends_at: occurrence.ends_at,
            timezone: occurrence.timezone.clone(),
            genre: event.details.genre().map(str::to_string),
            borough: event.details.borough().map(str::to_string),
            price_cents: event.details.price_cents(),
            is_free: event.details.is_free(),
        }
    }
}
