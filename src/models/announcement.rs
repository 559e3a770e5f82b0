//! Announcement model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementType {
    #[default]
    Info,
    Warning,
    Success,
    Error,
}

impl AnnouncementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementType::Info => "info",
            AnnouncementType::Warning => "warning",
            AnnouncementType::Success => "success",
            AnnouncementType::Error => "error",
        }
    }
}

impl fmt::Display for AnnouncementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnouncementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(AnnouncementType::Info),
            "warning" => Ok(AnnouncementType::Warning),
            "success" => Ok(AnnouncementType::Success),
            "error" => Ok(AnnouncementType::Error),
            other => Err(format!("unknown announcement type: {}", other)),
        }
    }
}

/// Lifecycle position derived from the publish/archive timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementState {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub published_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Announcement {
    pub fn state(&self) -> AnnouncementState {
        if self.archived_at.is_some() {
            AnnouncementState::Archived
        } else if self.published_at.is_some() {
            AnnouncementState::Published
        } else {
            AnnouncementState::Draft
        }
    }

    /// Published at or before `now` and not archived
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.archived_at.is_none() && self.published_at.map_or(false, |at| at <= now)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAnnouncementRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub announcement_type: AnnouncementType,
    /// Publish immediately instead of saving a draft
    #[serde(default)]
    pub publish: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub announcement_type: Option<AnnouncementType>,
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Uuid,
}
