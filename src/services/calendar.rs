//! Calendar query and filtering
//!
//! Approved occurrences within a date range, narrowed by composable
//! predicates over type, genre, borough and price.

use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use crate::database::EventStore;
use crate::models::calendar::{CalendarEntry, CalendarParams, CalendarQuery};
use crate::models::event::{Event, EventType};
use crate::utils::errors::{AppError, FieldIssue, Result};
use crate::utils::helpers::split_csv;

pub const DEFAULT_RANGE_DAYS: i64 = 30;
pub const MAX_RANGE_DAYS: i64 = 366;

type Predicate = Box<dyn Fn(&Event) -> bool + Send + Sync>;

impl CalendarQuery {
    /// Resolve query-string parameters, applying the default range
    pub fn from_params(params: CalendarParams, now: DateTime<Utc>) -> Result<Self> {
        let mut issues = Vec::new();

        let start = params.start.unwrap_or(now);
        let end = params
            .end
            .or_else(|| start.checked_add_signed(Duration::days(DEFAULT_RANGE_DAYS)));
        match end {
            None => issues.push(FieldIssue::new("start", "out of range")),
            Some(end) if end <= start => issues.push(FieldIssue::new("end", "must be after start")),
            Some(end) if end - start > Duration::days(MAX_RANGE_DAYS) => {
                issues.push(FieldIssue::new("end", format!("range must not exceed {} days", MAX_RANGE_DAYS)))
            }
            Some(_) => {}
        }

        let mut types = Vec::new();
        for value in params.types.as_deref().map(split_csv).unwrap_or_default() {
            match value.parse::<EventType>() {
                Ok(event_type) => types.push(event_type),
                Err(message) => issues.push(FieldIssue::new("types", message)),
            }
        }

        if matches!(params.max_price_cents, Some(price) if price < 0) {
            issues.push(FieldIssue::new("max_price_cents", "must not be negative"));
        }

        let end = match end {
            Some(end) if issues.is_empty() => end,
            _ => return Err(AppError::Validation(issues)),
        };

        Ok(Self {
            start,
            end,
            types,
            genres: params.genres.as_deref().map(split_csv).unwrap_or_default(),
            boroughs: params.boroughs.as_deref().map(split_csv).unwrap_or_default(),
            free_only: params.free_only,
            max_price_cents: params.max_price_cents,
        })
    }

    /// Build the event-level predicates this query implies
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates: Vec<Predicate> = Vec::new();

        if !self.types.is_empty() {
            let types = self.types.clone();
            predicates.push(Box::new(move |event| types.contains(&event.event_type)));
        }

        if !self.genres.is_empty() {
            let genres = self.genres.clone();
            predicates.push(Box::new(move |event| {
                event
                    .details
                    .genre()
                    .map_or(false, |genre| genres.iter().any(|g| g.eq_ignore_ascii_case(genre.trim())))
            }));
        }

        if !self.boroughs.is_empty() {
            let boroughs = self.boroughs.clone();
            predicates.push(Box::new(move |event| {
                event
                    .details
                    .borough()
                    .map_or(false, |borough| boroughs.iter().any(|b| b.eq_ignore_ascii_case(borough.trim())))
            }));
        }

        if self.free_only {
            predicates.push(Box::new(|event| event.details.is_free()));
        }

        if let Some(max_price) = self.max_price_cents {
            predicates.push(Box::new(move |event| {
                event.details.is_free() || event.details.price_cents().map_or(true, |price| price <= max_price)
            }));
        }

        predicates
    }

    /// Expand matching events into sorted calendar entries within the range
    pub fn apply(&self, events: &[Event]) -> Vec<CalendarEntry> {
        let predicates = self.predicates();

        let mut entries: Vec<CalendarEntry> = events
            .iter()
            .filter(|event| predicates.iter().all(|matches| matches(event)))
            .flat_map(|event| {
                event
                    .occurrences
                    .iter()
                    .filter(|o| o.starts_at >= self.start && o.starts_at < self.end)
                    .map(move |o| CalendarEntry::new(event, o))
            })
            .collect();

        entries.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.title.cmp(&b.title)));
        entries
    }
}

#[derive(Clone)]
pub struct CalendarService {
    events: Arc<dyn EventStore>,
}

impl CalendarService {
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    pub async fn query(&self, params: CalendarParams) -> Result<Vec<CalendarEntry>> {
        let query = CalendarQuery::from_params(params, Utc::now())?;
        let events = self.events.list_approved_in_range(query.start, query.end).await?;
        let entries = query.apply(&events);

        debug!(
            start = %query.start,
            end = %query.end,
            candidates = events.len(),
            entries = entries.len(),
            "Calendar query served"
        );
        Ok(entries)
    }
}
