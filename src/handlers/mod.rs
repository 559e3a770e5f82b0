//! HTTP handlers module
//!
//! This module contains the JSON API organized by resource:
//! - Event submission, listing and editing
//! - Moderation (approve/reject, history, queue)
//! - Calendar queries
//! - Announcements
//! - Profiles and roles

pub mod announcements;
pub mod calendar;
pub mod events;
pub mod extract;
pub mod health;
pub mod reviews;
pub mod users;

use std::sync::Arc;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use crate::config::ServerConfig;
use crate::middleware::{trace_layer, SubmissionRateLimiter};
use crate::services::ServiceFactory;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
    pub rate_limiter: SubmissionRateLimiter,
}

impl AppState {
    pub fn new(services: ServiceFactory, rate_limiter: SubmissionRateLimiter) -> Self {
        Self {
            services: Arc::new(services),
            rate_limiter,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/events", post(events::create_event).get(events::list_events))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:id/approve", post(reviews::approve_event))
        .route("/events/:id/reject", post(reviews::reject_event))
        .route("/events/:id/reviews", get(reviews::list_reviews))
        .route("/events/:id/photos", get(events::event_photos))
        .route("/moderation/queue", get(reviews::moderation_queue))
        .route("/moderation/stats", get(reviews::moderation_stats))
        .route("/calendar", get(calendar::get_calendar))
        .route(
            "/announcements",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route(
            "/announcements/:id",
            put(announcements::update_announcement).delete(announcements::delete_announcement),
        )
        .route("/announcements/:id/publish", post(announcements::publish_announcement))
        .route("/announcements/:id/archive", post(announcements::archive_announcement))
        .route("/me", get(users::get_me).put(users::update_me))
        .route("/users", get(users::list_users))
        .route("/users/:id/role", put(users::set_role));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(trace_layer())
        .with_state(state)
}

/// CORS policy for browser clients
///
/// An empty origin list allows any origin without credentials.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        return base.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins)).allow_credentials(true)
}
