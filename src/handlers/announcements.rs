//! Announcement handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use uuid::Uuid;
use crate::handlers::extract::{ApiJson, ApiPath, ApiQuery};
use crate::handlers::AppState;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::models::announcement::{CreateAnnouncementRequest, UpdateAnnouncementRequest};
use crate::utils::errors::Result;

#[derive(Debug, Default, Deserialize)]
pub struct AnnouncementListParams {
    pub active: Option<bool>,
}

/// GET /api/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    ApiQuery(params): ApiQuery<AnnouncementListParams>,
) -> Result<impl IntoResponse> {
    let announcements = state
        .services
        .announcement_service
        .list(params.active, caller.as_ref())
        .await?;
    Ok(Json(announcements))
}

/// POST /api/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiJson(request): ApiJson<CreateAnnouncementRequest>,
) -> Result<impl IntoResponse> {
    let announcement = state.services.announcement_service.create(request, &caller).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// PUT /api/announcements/:id
pub async fn update_announcement(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateAnnouncementRequest>,
) -> Result<impl IntoResponse> {
    let announcement = state.services.announcement_service.update(id, request, &caller).await?;
    Ok(Json(announcement))
}

/// POST /api/announcements/:id/publish
pub async fn publish_announcement(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let announcement = state.services.announcement_service.publish(id, &caller).await?;
    Ok(Json(announcement))
}

/// POST /api/announcements/:id/archive
pub async fn archive_announcement(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let announcement = state.services.announcement_service.archive(id, &caller).await?;
    Ok(Json(announcement))
}

/// DELETE /api/announcements/:id
pub async fn delete_announcement(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.services.announcement_service.delete(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
