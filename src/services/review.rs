//! Review workflow
//!
//! pending -> approved | rejected, one review record per transition.
//! Repeating the decision an event already carries is a no-op; asking for
//! the opposite decision on a decided event is a conflict.

use std::sync::Arc;
use tracing::{info, debug};
use uuid::Uuid;
use crate::database::EventStore;
use crate::models::event::{Event, EventFilter, EventStatus};
use crate::models::review::{NewReview, Review, ReviewDecision, ReviewOutcome};
use crate::services::auth::{AuthContext, Permission};
use crate::utils::errors::{AppError, Result};
use crate::utils::helpers::normalize_whitespace;
use crate::utils::logging::log_admin_action;

/// Result of a review call as returned to the client
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReviewResult {
    pub event: Event,
    /// The review written by this call; absent when the call was a repeat
    pub review: Option<Review>,
}

#[derive(Clone)]
pub struct ReviewService {
    events: Arc<dyn EventStore>,
}

impl ReviewService {
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    pub async fn approve(&self, event_id: Uuid, notes: Option<String>, reviewer: &AuthContext) -> Result<ReviewResult> {
        self.decide(event_id, ReviewDecision::Approved, notes, reviewer).await
    }

    pub async fn reject(&self, event_id: Uuid, notes: Option<String>, reviewer: &AuthContext) -> Result<ReviewResult> {
        self.decide(event_id, ReviewDecision::Rejected, notes, reviewer).await
    }

    async fn decide(
        &self,
        event_id: Uuid,
        decision: ReviewDecision,
        notes: Option<String>,
        reviewer: &AuthContext,
    ) -> Result<ReviewResult> {
        reviewer.require(Permission::ReviewEvents)?;

        let notes = notes.map(|n| normalize_whitespace(&n)).filter(|n| !n.is_empty());
        let outcome = self
            .events
            .apply_review(NewReview {
                event_id,
                decision,
                notes,
                reviewer_id: reviewer.user_id,
            })
            .await?;

        let review = match outcome {
            ReviewOutcome::Recorded(review) => {
                log_admin_action(reviewer.user_id, decision.as_str(), Some(&event_id.to_string()), review.notes.as_deref());
                info!(event_id = %event_id, decision = %decision, "Event reviewed");
                Some(review)
            }
            ReviewOutcome::AlreadyDecided(status) if status == decision.target_status() => {
                debug!(event_id = %event_id, status = %status, "Repeated review ignored");
                None
            }
            ReviewOutcome::AlreadyDecided(status) => {
                return Err(AppError::InvalidStateTransition {
                    from: status.to_string(),
                    to: decision.target_status().to_string(),
                });
            }
        };

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AppError::EventNotFound { event_id })?;

        Ok(ReviewResult { event, review })
    }

    /// Review history for an event, oldest first
    pub async fn history(&self, event_id: Uuid, caller: &AuthContext) -> Result<Vec<Review>> {
        caller.require(Permission::ViewModeration)?;

        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(AppError::EventNotFound { event_id });
        }
        self.events.list_reviews(event_id).await
    }

    /// Pending submissions, newest first
    pub async fn queue(&self, caller: &AuthContext, limit: i64, offset: i64) -> Result<Vec<Event>> {
        caller.require(Permission::ViewModeration)?;

        self.events
            .list(&EventFilter {
                status: Some(EventStatus::Pending),
                limit,
                offset,
                ..Default::default()
            })
            .await
    }
}
