//! Event model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Kind of listing an artist submits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Performance,
    Audition,
    Creative,
    Class,
    Funding,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Performance,
        EventType::Audition,
        EventType::Creative,
        EventType::Class,
        EventType::Funding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Performance => "performance",
            EventType::Audition => "audition",
            EventType::Creative => "creative",
            EventType::Class => "class",
            EventType::Funding => "funding",
        }
    }

    /// Whether a submission of this type must carry at least one occurrence
    pub fn requires_occurrence(&self) -> bool {
        matches!(self, EventType::Performance | EventType::Audition | EventType::Class)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown event type: {}", s))
    }
}

/// Moderation status of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
            EventStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, EventStatus::Pending)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(EventStatus::Pending),
            "approved" => Ok(EventStatus::Approved),
            "rejected" => Ok(EventStatus::Rejected),
            other => Err(format!("unknown event status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceDetails {
    #[serde(default)]
    pub venue_name: String,
    pub address: Option<String>,
    pub borough: Option<String>,
    pub genre: Option<String>,
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub is_free: bool,
    pub ticket_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditionDetails {
    pub venue_name: Option<String>,
    pub borough: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub compensation: Option<String>,
    pub application_url: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreativeDetails {
    #[serde(default)]
    pub opportunity_kind: String,
    pub compensation: Option<String>,
    pub application_url: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub borough: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDetails {
    #[serde(default)]
    pub instructor: String,
    pub venue_name: Option<String>,
    pub borough: Option<String>,
    pub genre: Option<String>,
    pub skill_level: Option<String>,
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub is_free: bool,
    pub registration_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundingDetails {
    #[serde(default)]
    pub organization: String,
    pub amount_cents: Option<i64>,
    pub eligibility: Option<String>,
    #[serde(default)]
    pub application_url: String,
    pub deadline: Option<DateTime<Utc>>,
}

/// Type-specific part of an event, tagged by its event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventDetails {
    Performance(PerformanceDetails),
    Audition(AuditionDetails),
    Creative(CreativeDetails),
    Class(ClassDetails),
    Funding(FundingDetails),
}

impl EventDetails {
    pub fn event_type(&self) -> EventType {
        match self {
            EventDetails::Performance(_) => EventType::Performance,
            EventDetails::Audition(_) => EventType::Audition,
            EventDetails::Creative(_) => EventType::Creative,
            EventDetails::Class(_) => EventType::Class,
            EventDetails::Funding(_) => EventType::Funding,
        }
    }

    pub fn genre(&self) -> Option<&str> {
        match self {
            EventDetails::Performance(d) => d.genre.as_deref(),
            EventDetails::Class(d) => d.genre.as_deref(),
            _ => None,
        }
    }

    pub fn borough(&self) -> Option<&str> {
        match self {
            EventDetails::Performance(d) => d.borough.as_deref(),
            EventDetails::Audition(d) => d.borough.as_deref(),
            EventDetails::Creative(d) => d.borough.as_deref(),
            EventDetails::Class(d) => d.borough.as_deref(),
            EventDetails::Funding(_) => None,
        }
    }

    /// Ticket or tuition price; `None` when the listing carries no price
    pub fn price_cents(&self) -> Option<i64> {
        match self {
            EventDetails::Performance(d) => d.price_cents,
            EventDetails::Class(d) => d.price_cents,
            _ => None,
        }
    }

    pub fn is_free(&self) -> bool {
        match self {
            EventDetails::Performance(d) => d.is_free || d.price_cents == Some(0),
            EventDetails::Class(d) => d.is_free || d.price_cents == Some(0),
            _ => false,
        }
    }
}

/// A single dated instance of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub storage_path: String,
    pub caption: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub event_type: EventType,
    pub status: EventStatus,
    pub title: String,
    pub description: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub details: EventDetails,
    pub occurrences: Vec<Occurrence>,
    pub photos: Vec<Photo>,
    pub submitted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.submitted_by == Some(user_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OccurrenceInput {
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timezone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoInput {
    #[serde(default)]
    pub storage_path: String,
    pub caption: Option<String>,
}

/// Raw submission payload; every field is checked by the submission validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub details: Option<EventDetails>,
    #[serde(default)]
    pub occurrences: Vec<OccurrenceInput>,
    #[serde(default)]
    pub photos: Vec<PhotoInput>,
}

/// Updates replace the whole submission and go through the same validation
pub type UpdateEventRequest = CreateEventRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct NewOccurrence {
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub storage_path: String,
    pub caption: Option<String>,
}

/// A validated submission ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub details: EventDetails,
    pub occurrences: Vec<NewOccurrence>,
    pub photos: Vec<NewPhoto>,
    pub submitted_by: Option<Uuid>,
}

impl NewEvent {
    pub fn event_type(&self) -> EventType {
        self.details.event_type()
    }
}

/// Filter for listing events
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub event_type: Option<EventType>,
    pub submitted_by: Option<Uuid>,
    pub limit: i64,
    pub offset: i64,
}
