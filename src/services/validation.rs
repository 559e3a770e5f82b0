//! Submission validation
//!
//! Checks raw event and announcement payloads and turns them into values the
//! stores accept. All failures are collected so the caller sees every field
//! issue in one response.

use uuid::Uuid;
use crate::models::announcement::{CreateAnnouncementRequest, UpdateAnnouncementRequest};
use crate::models::event::*;
use crate::utils::errors::{AppError, FieldIssue, Result};
use crate::utils::helpers::{
    is_blank, is_safe_storage_path, is_valid_email, is_valid_http_url, is_valid_phone, is_valid_timezone,
};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 5000;
pub const MAX_SHORT_TEXT_LEN: usize = 500;
pub const MAX_OCCURRENCES: usize = 50;
pub const MAX_PHOTOS: usize = 10;
pub const MAX_ANNOUNCEMENT_CONTENT_LEN: usize = 10_000;

/// Accumulates field issues
#[derive(Debug, Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldIssue::new(field, message));
    }

    fn required_text(&mut self, field: &str, value: &str, max_len: usize) {
        if is_blank(value) {
            self.push(field, "is required");
        } else if value.chars().count() > max_len {
            self.push(field, format!("must be at most {} characters", max_len));
        }
    }

    fn optional_text(&mut self, field: &str, value: Option<&str>, max_len: usize) {
        if let Some(value) = value {
            if value.chars().count() > max_len {
                self.push(field, format!("must be at most {} characters", max_len));
            }
        }
    }

    fn optional_url(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !is_blank(v)) {
            if !is_valid_http_url(value.trim()) {
                self.push(field, "must be an absolute http(s) URL");
            }
        }
    }

    fn amount(&mut self, field: &str, value: Option<i64>) {
        if matches!(value, Some(amount) if amount < 0) {
            self.push(field, "must not be negative");
        }
    }

    fn price(&mut self, prefix: &str, price_cents: Option<i64>, is_free: bool) {
        self.amount(&format!("{}.price_cents", prefix), price_cents);
        if is_free && matches!(price_cents, Some(price) if price > 0) {
            self.push(format!("{}.price_cents", prefix), "must be empty or zero for a free listing");
        }
    }

    fn finish(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0))
        }
    }
}

/// Trim a value and drop it when blank
fn clean(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn validate_details(details: &EventDetails, issues: &mut Issues) {
    match details {
        EventDetails::Performance(d) => {
            issues.required_text("details.venue_name", &d.venue_name, MAX_SHORT_TEXT_LEN);
            issues.optional_text("details.address", d.address.as_deref(), MAX_SHORT_TEXT_LEN);
            issues.optional_url("details.ticket_url", d.ticket_url.as_deref());
            issues.price("details", d.price_cents, d.is_free);
        }
        EventDetails::Audition(d) => {
            if d.roles.iter().all(|role| is_blank(role)) {
                issues.push("details.roles", "must list at least one role");
            }
            issues.optional_url("details.application_url", d.application_url.as_deref());
            issues.optional_text("details.compensation", d.compensation.as_deref(), MAX_SHORT_TEXT_LEN);
        }
        EventDetails::Creative(d) => {
            issues.required_text("details.opportunity_kind", &d.opportunity_kind, MAX_SHORT_TEXT_LEN);
            issues.optional_url("details.application_url", d.application_url.as_deref());
            issues.optional_text("details.compensation", d.compensation.as_deref(), MAX_SHORT_TEXT_LEN);
        }
        EventDetails::Class(d) => {
            issues.required_text("details.instructor", &d.instructor, MAX_SHORT_TEXT_LEN);
            issues.optional_url("details.registration_url", d.registration_url.as_deref());
            issues.price("details", d.price_cents, d.is_free);
        }
        EventDetails::Funding(d) => {
            issues.required_text("details.organization", &d.organization, MAX_SHORT_TEXT_LEN);
            if is_blank(&d.application_url) {
                issues.push("details.application_url", "is required");
            } else if !is_valid_http_url(d.application_url.trim()) {
                issues.push("details.application_url", "must be an absolute http(s) URL");
            }
            issues.amount("details.amount_cents", d.amount_cents);
            issues.optional_text("details.eligibility", d.eligibility.as_deref(), MAX_DESCRIPTION_LEN);
        }
    }
}

fn validate_occurrences(event_type: Option<EventType>, occurrences: &[OccurrenceInput], issues: &mut Issues) {
    if occurrences.is_empty() && event_type.map_or(false, |t| t.requires_occurrence()) {
        issues.push("occurrences", "at least one date is required for this listing type");
    }
    if occurrences.len() > MAX_OCCURRENCES {
        issues.push("occurrences", format!("must have at most {} dates", MAX_OCCURRENCES));
    }

    for (index, occurrence) in occurrences.iter().enumerate() {
        let field = |name: &str| format!("occurrences[{}].{}", index, name);

        match occurrence.starts_at {
            None => issues.push(field("starts_at"), "is required"),
            Some(starts_at) => {
                if matches!(occurrence.ends_at, Some(ends_at) if ends_at < starts_at) {
                    issues.push(field("ends_at"), "must not be before starts_at");
                }
            }
        }

        if is_blank(&occurrence.timezone) {
            issues.push(field("timezone"), "is required");
        } else if !is_valid_timezone(occurrence.timezone.trim()) {
            issues.push(field("timezone"), "must be an IANA time zone name");
        }
    }
}

fn validate_photos(photos: &[PhotoInput], issues: &mut Issues) {
    if photos.len() > MAX_PHOTOS {
        issues.push("photos", format!("must have at most {} photos", MAX_PHOTOS));
    }

    for (index, photo) in photos.iter().enumerate() {
        if !is_safe_storage_path(photo.storage_path.trim()) {
            issues.push(format!("photos[{}].storage_path", index), "must be a relative storage path");
        }
        issues.optional_text(&format!("photos[{}].caption", index), photo.caption.as_deref(), MAX_SHORT_TEXT_LEN);
    }
}

/// Validate an event submission and produce the value to persist
pub fn validate_submission(request: &CreateEventRequest, submitted_by: Option<Uuid>) -> Result<NewEvent> {
    let mut issues = Issues::default();

    issues.required_text("title", &request.title, MAX_TITLE_LEN);
    issues.required_text("description", &request.description, MAX_DESCRIPTION_LEN);
    issues.required_text("contact_name", &request.contact_name, MAX_SHORT_TEXT_LEN);

    if is_blank(&request.contact_email) {
        issues.push("contact_email", "is required");
    } else if !is_valid_email(request.contact_email.trim()) {
        issues.push("contact_email", "must be a valid email address");
    }

    if let Some(phone) = request.contact_phone.as_deref().filter(|p| !is_blank(p)) {
        if !is_valid_phone(phone.trim()) {
            issues.push("contact_phone", "must be a valid phone number");
        }
    }
    issues.optional_url("website", request.website.as_deref());

    match &request.details {
        None => issues.push("details", "is required"),
        Some(details) => validate_details(details, &mut issues),
    }

    validate_occurrences(
        request.details.as_ref().map(EventDetails::event_type),
        &request.occurrences,
        &mut issues,
    );
    validate_photos(&request.photos, &mut issues);

    issues.finish()?;

    let details = request
        .details
        .clone()
        .ok_or_else(|| AppError::invalid_field("details", "is required"))?;

    let occurrences = request
        .occurrences
        .iter()
        .filter_map(|o| {
            o.starts_at.map(|starts_at| NewOccurrence {
                starts_at,
                ends_at: o.ends_at,
                timezone: o.timezone.trim().to_string(),
            })
        })
        .collect();

    let photos = request
        .photos
        .iter()
        .map(|p| NewPhoto {
            storage_path: p.storage_path.trim().to_string(),
            caption: clean(p.caption.as_ref()),
        })
        .collect();

    Ok(NewEvent {
        title: request.title.trim().to_string(),
        description: request.description.trim().to_string(),
        contact_name: request.contact_name.trim().to_string(),
        contact_email: request.contact_email.trim().to_string(),
        contact_phone: clean(request.contact_phone.as_ref()),
        website: clean(request.website.as_ref()),
        details,
        occurrences,
        photos,
        submitted_by,
    })
}

/// Validate a new announcement
pub fn validate_announcement(request: &CreateAnnouncementRequest) -> Result<()> {
    let mut issues = Issues::default();
    issues.required_text("title", &request.title, MAX_TITLE_LEN);
    issues.required_text("content", &request.content, MAX_ANNOUNCEMENT_CONTENT_LEN);
    issues.finish()
}

/// Validate a partial announcement update; absent fields are left unchanged
pub fn validate_announcement_update(request: &UpdateAnnouncementRequest) -> Result<()> {
    let mut issues = Issues::default();
    if let Some(title) = &request.title {
        issues.required_text("title", title, MAX_TITLE_LEN);
    }
    if let Some(content) = &request.content {
        issues.required_text("content", content, MAX_ANNOUNCEMENT_CONTENT_LEN);
    }
    issues.finish()
}
