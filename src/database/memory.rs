//! In-memory store
//!
//! Implements every storage trait over process-local maps. Used when
//! `database.in_memory` is set and by the HTTP tests.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::database::store::{AnnouncementStore, EventStore, ProfileStore};
use crate::models::*;
use crate::utils::errors::{AppError, Result};

#[derive(Default)]
struct MemoryState {
    events: HashMap<Uuid, Event>,
    reviews: Vec<Review>,
    announcements: HashMap<Uuid, Announcement>,
    profiles: HashMap<Uuid, Profile>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn build_event(id: Uuid, new: NewEvent, status: EventStatus, created_at: DateTime<Utc>) -> Event {
    let mut occurrences: Vec<Occurrence> = new
        .occurrences
        .into_iter()
        .map(|o| Occurrence {
            id: Uuid::new_v4(),
            starts_at: o.starts_at,
            ends_at: o.ends_at,
            timezone: o.timezone,
        })
        .collect();
    occurrences.sort_by_key(|o| o.starts_at);

    let photos = new
        .photos
        .into_iter()
        .enumerate()
        .map(|(position, p)| Photo {
            id: Uuid::new_v4(),
            storage_path: p.storage_path,
            caption: p.caption,
            position: position as i32,
        })
        .collect();

    Event {
        id,
        event_type: new.details.event_type(),
        status,
        title: new.title,
        description: new.description,
        contact_name: new.contact_name,
        contact_email: new.contact_email,
        contact_phone: new.contact_phone,
        website: new.website,
        details: new.details,
        occurrences,
        photos,
        submitted_by: new.submitted_by,
        created_at,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create(&self, event: NewEvent) -> Result<Event> {
        let id = Uuid::new_v4();
        let event = build_event(id, event, EventStatus::Pending, Utc::now());
        self.state.write().await.events.insert(id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.state.read().await.events.get(&id).cloned())
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|e| filter.status.map_or(true, |s| e.status == s))
            .filter(|e| filter.event_type.map_or(true, |t| e.event_type == t))
            .filter(|e| filter.submitted_by.map_or(true, |u| e.submitted_by == Some(u)))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(events
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .collect())
    }

    async fn replace(&self, id: Uuid, event: NewEvent) -> Result<Event> {
        let mut state = self.state.write().await;
        let existing = state.events.get(&id).ok_or(AppError::EventNotFound { event_id: id })?;

        let mut replaced = build_event(id, event, existing.status, existing.created_at);
        replaced.submitted_by = existing.submitted_by;
        state.events.insert(id, replaced.clone());
        Ok(replaced)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        let removed = state.events.remove(&id).is_some();
        if removed {
            state.reviews.retain(|r| r.event_id != id);
        }
        Ok(removed)
    }

    async fn apply_review(&self, review: NewReview) -> Result<ReviewOutcome> {
        let mut state = self.state.write().await;
        let event = state
            .events
            .get_mut(&review.event_id)
            .ok_or(AppError::EventNotFound { event_id: review.event_id })?;

        if event.status.is_terminal() {
            return Ok(ReviewOutcome::AlreadyDecided(event.status));
        }

        let now = Utc::now();
        event.status = review.decision.target_status();
        event.updated_at = now;

        let record = Review {
            id: Uuid::new_v4(),
            event_id: review.event_id,
            decision: review.decision,
            notes: review.notes,
            reviewer_id: review.reviewer_id,
            created_at: now,
        };
        state.reviews.push(record.clone());
        Ok(ReviewOutcome::Recorded(record))
    }

    async fn list_reviews(&self, event_id: Uuid) -> Result<Vec<Review>> {
        let state = self.state.read().await;
        Ok(state.reviews.iter().filter(|r| r.event_id == event_id).cloned().collect())
    }

    async fn list_approved_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Event>> {
        let state = self.state.read().await;
        Ok(state
            .events
            .values()
            .filter(|e| e.status == EventStatus::Approved)
            .filter(|e| e.occurrences.iter().any(|o| o.starts_at >= start && o.starts_at < end))
            .cloned()
            .collect())
    }

    async fn count_by_status(&self, status: EventStatus) -> Result<i64> {
        let state = self.state.read().await;
        Ok(state.events.values().filter(|e| e.status == status).count() as i64)
    }
}

#[async_trait]
impl AnnouncementStore for MemoryStore {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let now = Utc::now();
        let record = Announcement {
            id: Uuid::new_v4(),
            title: announcement.title,
            content: announcement.content,
            announcement_type: announcement.announcement_type,
            published_at: announcement.published_at,
            archived_at: None,
            author_id: announcement.author_id,
            created_at: now,
            updated_at: now,
        };
        self.state.write().await.announcements.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        Ok(self.state.read().await.announcements.get(&id).cloned())
    }

    async fn list(&self, active_at: Option<DateTime<Utc>>) -> Result<Vec<Announcement>> {
        let state = self.state.read().await;
        let mut announcements: Vec<Announcement> = state
            .announcements
            .values()
            .filter(|a| active_at.map_or(true, |now| a.is_active(now)))
            .cloned()
            .collect();
        announcements.sort_by(|a, b| {
            let a_key = a.published_at.unwrap_or(a.created_at);
            let b_key = b.published_at.unwrap_or(b.created_at);
            b_key.cmp(&a_key)
        });
        Ok(announcements)
    }

    async fn update(&self, id: Uuid, request: UpdateAnnouncementRequest) -> Result<Announcement> {
        let mut state = self.state.write().await;
        let announcement = state
            .announcements
            .get_mut(&id)
            .ok_or(AppError::AnnouncementNotFound { announcement_id: id })?;

        if let Some(title) = request.title {
            announcement.title = title;
        }
        if let Some(content) = request.content {
            announcement.content = content;
        }
        if let Some(announcement_type) = request.announcement_type {
            announcement.announcement_type = announcement_type;
        }
        announcement.updated_at = Utc::now();
        Ok(announcement.clone())
    }

    async fn set_published(&self, id: Uuid, at: DateTime<Utc>) -> Result<Announcement> {
        let mut state = self.state.write().await;
        let announcement = state
            .announcements
            .get_mut(&id)
            .ok_or(AppError::AnnouncementNotFound { announcement_id: id })?;

        announcement.published_at = Some(at);
        announcement.archived_at = None;
        announcement.updated_at = at;
        Ok(announcement.clone())
    }

    async fn set_archived(&self, id: Uuid, at: DateTime<Utc>) -> Result<Announcement> {
        let mut state = self.state.write().await;
        let announcement = state
            .announcements
            .get_mut(&id)
            .ok_or(AppError::AnnouncementNotFound { announcement_id: id })?;

        announcement.archived_at = Some(at);
        announcement.updated_at = at;
        Ok(announcement.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.state.write().await.announcements.remove(&id).is_some())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        Ok(self.state.read().await.profiles.get(&id).cloned())
    }

    async fn create_if_missing(&self, request: CreateProfileRequest) -> Result<Profile> {
        let mut state = self.state.write().await;
        let profile = state.profiles.entry(request.id).or_insert_with(|| {
            let now = Utc::now();
            Profile {
                id: request.id,
                name: request.name,
                email: request.email,
                role: request.role,
                artist_status: ArtistStatus::default(),
                created_at: now,
                updated_at: now,
            }
        });
        Ok(profile.clone())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Profile>> {
        let state = self.state.read().await;
        let mut profiles: Vec<Profile> = state.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update(&self, id: Uuid, request: UpdateProfileRequest) -> Result<Profile> {
        let mut state = self.state.write().await;
        let profile = state.profiles.get_mut(&id).ok_or(AppError::UserNotFound { user_id: id })?;

        if let Some(name) = request.name {
            profile.name = Some(name);
        }
        if let Some(artist_status) = request.artist_status {
            profile.artist_status = artist_status;
        }
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> Result<Profile> {
        let mut state = self.state.write().await;
        let profile = state.profiles.get_mut(&id).ok_or(AppError::UserNotFound { user_id: id })?;

        profile.role = role;
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }
}
