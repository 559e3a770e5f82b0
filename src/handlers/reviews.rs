//! Moderation handlers

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use uuid::Uuid;
use crate::handlers::extract::{parse_optional_body, ApiPath, ApiQuery};
use crate::handlers::AppState;
use crate::middleware::auth::AuthUser;
use crate::models::review::ReviewRequest;
use crate::services::auth::Permission;
use crate::utils::errors::Result;
use crate::utils::helpers::{clamp_limit, clamp_offset};

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/events/:id/approve
///
/// The body is optional: `{"notes": "..."}`.
pub async fn approve_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let request: ReviewRequest = parse_optional_body(&body)?;
    let result = state.services.review_service.approve(id, request.notes, &caller).await?;
    Ok(Json(result))
}

/// POST /api/events/:id/reject
pub async fn reject_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let request: ReviewRequest = parse_optional_body(&body)?;
    let result = state.services.review_service.reject(id, request.notes, &caller).await?;
    Ok(Json(result))
}

/// GET /api/events/:id/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let reviews = state.services.review_service.history(id, &caller).await?;
    Ok(Json(reviews))
}

/// GET /api/moderation/queue
pub async fn moderation_queue(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiQuery(page): ApiQuery<PageParams>,
) -> Result<impl IntoResponse> {
    let events = state
        .services
        .review_service
        .queue(&caller, clamp_limit(page.limit), clamp_offset(page.offset))
        .await?;
    Ok(Json(events))
}

/// GET /api/moderation/stats
pub async fn moderation_stats(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse> {
    caller.require(Permission::ViewModeration)?;
    let stats = state.services.database.get_moderation_stats().await?;
    Ok(Json(stats))
}
