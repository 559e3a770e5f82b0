//! Review model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use super::event::EventStatus;

/// Moderation decision recorded by a reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Approved => "approved",
            ReviewDecision::Rejected => "rejected",
        }
    }

    /// Status an event moves to when this decision is applied
    pub fn target_status(&self) -> EventStatus {
        match self {
            ReviewDecision::Approved => EventStatus::Approved,
            ReviewDecision::Rejected => EventStatus::Rejected,
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(ReviewDecision::Approved),
            "rejected" => Ok(ReviewDecision::Rejected),
            other => Err(format!("unknown review decision: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub event_id: Uuid,
    pub decision: ReviewDecision,
    pub notes: Option<String>,
    pub reviewer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Body accepted by the approve/reject endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub event_id: Uuid,
    pub decision: ReviewDecision,
    pub notes: Option<String>,
    pub reviewer_id: Uuid,
}

/// Outcome of applying a review to the store
#[derive(Debug, Clone)]
pub enum ReviewOutcome {
    /// The event left `pending` and the review was appended
    Recorded(Review),
    /// The event had already left `pending`; nothing was written
    AlreadyDecided(EventStatus),
}
