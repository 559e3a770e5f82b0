//! Profile and role handlers

use axum::{extract::State, response::IntoResponse, Json};
use uuid::Uuid;
use crate::handlers::extract::{ApiJson, ApiPath, ApiQuery};
use crate::handlers::reviews::PageParams;
use crate::handlers::AppState;
use crate::middleware::auth::AuthUser;
use crate::models::user::{UpdateProfileRequest, UpdateRoleRequest};
use crate::utils::errors::Result;
use crate::utils::helpers::{clamp_limit, clamp_offset};

/// GET /api/me
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse> {
    let profile = state.services.user_service.me(&caller).await?;
    Ok(Json(profile))
}

/// PUT /api/me
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse> {
    let profile = state.services.user_service.update_me(request, &caller).await?;
    Ok(Json(profile))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiQuery(page): ApiQuery<PageParams>,
) -> Result<impl IntoResponse> {
    let users = state
        .services
        .user_service
        .list_users(&caller, clamp_limit(page.limit), clamp_offset(page.offset))
        .await?;
    Ok(Json(users))
}

/// PUT /api/users/:id/role
pub async fn set_role(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateRoleRequest>,
) -> Result<impl IntoResponse> {
    let profile = state.services.user_service.set_role(id, request.role, &caller).await?;
    Ok(Json(profile))
}
