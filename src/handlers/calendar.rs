//! Calendar handler

use axum::{extract::State, response::IntoResponse, Json};
use crate::handlers::extract::ApiQuery;
use crate::handlers::AppState;
use crate::models::calendar::CalendarParams;
use crate::utils::errors::Result;

/// GET /api/calendar
pub async fn get_calendar(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CalendarParams>,
) -> Result<impl IntoResponse> {
    let entries = state.services.calendar_service.query(params).await?;
    Ok(Json(entries))
}
