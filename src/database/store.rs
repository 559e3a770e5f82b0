//! Storage traits
//!
//! Services talk to persistence only through these traits so the same
//! business logic runs on Postgres and on the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::*;
use crate::utils::errors::Result;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist a validated submission with status `pending`
    async fn create(&self, event: NewEvent) -> Result<Event>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    /// Newest first
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>>;

    /// Replace the submitted content of an event, keeping its status and submitter
    async fn replace(&self, id: Uuid, event: NewEvent) -> Result<Event>;

    /// Remove an event with its occurrences, photos and reviews; false if absent
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Move a pending event to the decision's status and append the review, atomically
    async fn apply_review(&self, review: NewReview) -> Result<ReviewOutcome>;

    /// Review history, oldest first
    async fn list_reviews(&self, event_id: Uuid) -> Result<Vec<Review>>;

    /// Approved events having at least one occurrence starting in `[start, end)`
    async fn list_approved_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Event>>;

    async fn count_by_status(&self, status: EventStatus) -> Result<i64>;
}

#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;

    /// All announcements, or only those active at the given instant; newest first
    async fn list(&self, active_at: Option<DateTime<Utc>>) -> Result<Vec<Announcement>>;

    async fn update(&self, id: Uuid, request: UpdateAnnouncementRequest) -> Result<Announcement>;

    /// Set `published_at` and clear `archived_at`
    async fn set_published(&self, id: Uuid, at: DateTime<Utc>) -> Result<Announcement>;

    async fn set_archived(&self, id: Uuid, at: DateTime<Utc>) -> Result<Announcement>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>>;

    /// Insert the profile unless one with the same id exists; returns the stored row
    async fn create_if_missing(&self, request: CreateProfileRequest) -> Result<Profile>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Profile>>;

    async fn update(&self, id: Uuid, request: UpdateProfileRequest) -> Result<Profile>;

    async fn update_role(&self, id: Uuid, role: UserRole) -> Result<Profile>;
}
