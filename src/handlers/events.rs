//! Event handlers
//!
//! Submission, listing, editing and deletion of events plus photo URLs.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use uuid::Uuid;
use crate::handlers::extract::{ApiJson, ApiPath, ApiQuery};
use crate::handlers::AppState;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::models::event::{CreateEventRequest, EventStatus, EventType, UpdateEventRequest};
use crate::services::event::EventListQuery;
use crate::utils::errors::{AppError, FieldIssue, Result};
use crate::utils::helpers::{clamp_limit, clamp_offset};

/// Query string for `GET /api/events`
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub mine: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl EventListParams {
    fn into_query(self) -> Result<EventListQuery> {
        let mut issues = Vec::new();

        let status = match self.status.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw
                .parse::<EventStatus>()
                .map_err(|message| issues.push(FieldIssue::new("status", message)))
                .ok(),
            None => None,
        };
        let event_type = match self.event_type.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw
                .parse::<EventType>()
                .map_err(|message| issues.push(FieldIssue::new("type", message)))
                .ok(),
            None => None,
        };

        if !issues.is_empty() {
            return Err(AppError::Validation(issues));
        }

        Ok(EventListQuery {
            status,
            event_type,
            mine: self.mine,
            limit: clamp_limit(self.limit),
            offset: clamp_offset(self.offset),
        })
    }
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse> {
    state.rate_limiter.check(&caller)?;
    let event = state.services.event_service.submit(request, &caller).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    ApiQuery(params): ApiQuery<EventListParams>,
) -> Result<impl IntoResponse> {
    let query = params.into_query()?;
    let events = state.services.event_service.list(query, caller.as_ref()).await?;
    Ok(Json(events))
}

/// GET /api/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let event = state.services.event_service.get_visible(id, caller.as_ref()).await?;
    Ok(Json(event))
}

/// PUT /api/events/:id
pub async fn update_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateEventRequest>,
) -> Result<impl IntoResponse> {
    let event = state.services.event_service.update(id, request, &caller).await?;
    Ok(Json(event))
}

/// DELETE /api/events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.services.event_service.delete(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/events/:id/photos
pub async fn event_photos(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let photos = state.services.event_service.signed_photos(id, caller.as_ref()).await?;
    Ok(Json(photos))
}
