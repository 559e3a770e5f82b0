//! Services module
//!
//! This module contains business logic services

pub mod announcement;
pub mod auth;
pub mod calendar;
pub mod event;
pub mod review;
pub mod storage;
pub mod user;
pub mod validation;

// Re-export commonly used services
pub use announcement::AnnouncementService;
pub use auth::{AuthService, AuthContext, Permission, SessionClaims};
pub use calendar::CalendarService;
pub use event::{EventService, EventListQuery};
pub use review::{ReviewService, ReviewResult};
pub use storage::{StorageService, SignedPhoto};
pub use user::UserService;

use serde::Serialize;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub review_service: ReviewService,
    pub calendar_service: CalendarService,
    pub announcement_service: AnnouncementService,
    pub user_service: UserService,
    pub auth_service: AuthService,
    pub storage_service: StorageService,
    pub database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: DatabaseService) -> Result<Self> {
        let storage_service = StorageService::new(settings.storage.clone())?;
        let auth_service = AuthService::new(settings.auth.clone(), database.users.clone());

        Ok(Self {
            event_service: EventService::new(database.events.clone(), storage_service.clone()),
            review_service: ReviewService::new(database.events.clone()),
            calendar_service: CalendarService::new(database.events.clone()),
            announcement_service: AnnouncementService::new(database.announcements.clone()),
            user_service: UserService::new(database.users.clone()),
            auth_service,
            storage_service,
            database,
        })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = self.database.health_check().await.is_ok();

        ServiceHealthStatus {
            database_healthy,
            in_memory: self.database.is_in_memory(),
            storage_enabled: self.storage_service.is_enabled(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub in_memory: bool,
    pub storage_enabled: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }
        if !self.storage_enabled {
            issues.push("Photo storage not configured".to_string());
        }

        issues
    }
}
