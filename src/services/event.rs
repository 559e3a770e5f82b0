//! Event service implementation
//!
//! Submission, editing, visibility rules and deletion of events.

use std::sync::Arc;
use tracing::{info, debug};
use uuid::Uuid;
use crate::database::EventStore;
use crate::models::event::{CreateEventRequest, Event, EventFilter, EventStatus, EventType, UpdateEventRequest};
use crate::services::auth::{AuthContext, Permission};
use crate::services::storage::{SignedPhoto, StorageService};
use crate::services::validation::validate_submission;
use crate::utils::errors::{AppError, Result};
use crate::utils::logging::{log_admin_action, log_event_action};

/// Listing query as requested by a caller
#[derive(Debug, Clone, Default)]
pub struct EventListQuery {
    pub status: Option<EventStatus>,
    pub event_type: Option<EventType>,
    /// Only the caller's own submissions
    pub mine: bool,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    storage: StorageService,
}

impl EventService {
    pub fn new(events: Arc<dyn EventStore>, storage: StorageService) -> Self {
        Self { events, storage }
    }

    /// Validate and store a new submission as pending
    pub async fn submit(&self, request: CreateEventRequest, caller: &AuthContext) -> Result<Event> {
        caller.require(Permission::SubmitEvent)?;

        let new_event = validate_submission(&request, Some(caller.user_id))?;
        let event = self.events.create(new_event).await?;

        log_event_action(event.id, "submitted", Some(caller.user_id), Some(event.event_type.as_str()));
        Ok(event)
    }

    /// Replace an event's content; submitters may only edit their own pending events
    pub async fn update(&self, id: Uuid, request: UpdateEventRequest, caller: &AuthContext) -> Result<Event> {
        let existing = self.find(id).await?;

        if !caller.has_permission(Permission::ManageEvents) {
            if !existing.is_owned_by(caller.user_id) {
                return Err(AppError::PermissionDenied("Only the submitter or an admin can edit this event".to_string()));
            }
            if existing.status.is_terminal() {
                return Err(AppError::InvalidStateTransition {
                    from: existing.status.to_string(),
                    to: "edited".to_string(),
                });
            }
        }

        let new_event = validate_submission(&request, existing.submitted_by)?;
        let event = self.events.replace(id, new_event).await?;

        log_event_action(event.id, "updated", Some(caller.user_id), None);
        Ok(event)
    }

    /// Fetch an event the caller is allowed to see
    ///
    /// Non-approved events are hidden from anonymous callers and reported as
    /// not found rather than forbidden.
    pub async fn get_visible(&self, id: Uuid, caller: Option<&AuthContext>) -> Result<Event> {
        let event = self.find(id).await?;

        if event.status == EventStatus::Approved || caller.map_or(false, |c| c.can_view_event(&event)) {
            Ok(event)
        } else {
            debug!(event_id = %id, "Hiding unapproved event from caller");
            Err(AppError::EventNotFound { event_id: id })
        }
    }

    /// List events; callers without moderation rights only see approved ones or their own
    pub async fn list(&self, query: EventListQuery, caller: Option<&AuthContext>) -> Result<Vec<Event>> {
        let can_moderate = caller.map_or(false, |c| c.has_permission(Permission::ViewModeration));

        let filter = if query.mine {
            let caller = caller.ok_or_else(|| AppError::Unauthenticated("Sign in to list your submissions".to_string()))?;
            EventFilter {
                status: query.status,
                event_type: query.event_type,
                submitted_by: Some(caller.user_id),
                limit: query.limit,
                offset: query.offset,
            }
        } else {
            let status = match query.status {
                Some(status) if can_moderate => Some(status),
                Some(EventStatus::Approved) | None if !can_moderate => Some(EventStatus::Approved),
                None => None,
                Some(_) if caller.is_none() => {
                    return Err(AppError::Unauthenticated("Sign in to list unapproved events".to_string()))
                }
                Some(_) => {
                    return Err(AppError::PermissionDenied(
                        "Moderation rights are required to list unapproved events".to_string(),
                    ))
                }
            };
            EventFilter {
                status,
                event_type: query.event_type,
                submitted_by: None,
                limit: query.limit,
                offset: query.offset,
            }
        };

        self.events.list(&filter).await
    }

    /// Permanently remove an event (admin only)
    pub async fn delete(&self, id: Uuid, caller: &AuthContext) -> Result<()> {
        caller.require(Permission::ManageEvents)?;

        if !self.events.delete(id).await? {
            return Err(AppError::EventNotFound { event_id: id });
        }

        log_admin_action(caller.user_id, "delete_event", Some(&id.to_string()), None);
        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    /// Signed URLs for the photos of a visible event
    pub async fn signed_photos(&self, id: Uuid, caller: Option<&AuthContext>) -> Result<Vec<SignedPhoto>> {
        let event = self.get_visible(id, caller).await?;
        if event.photos.is_empty() {
            return Ok(Vec::new());
        }
        self.storage.sign_photos(&event.photos).await
    }

    async fn find(&self, id: Uuid) -> Result<Event> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or(AppError::EventNotFound { event_id: id })
    }
}
