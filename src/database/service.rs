//! Database service layer
//!
//! Bundles the store implementations behind their traits so services can be
//! wired against Postgres or the in-memory store interchangeably.

use std::sync::Arc;
use crate::database::{
    connection, AnnouncementRepository, AnnouncementStore, DatabasePool, EventRepository, EventStore,
    MemoryStore, ProfileStore, UserRepository,
};
use crate::models::EventStatus;
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct DatabaseService {
    pub users: Arc<dyn ProfileStore>,
    pub events: Arc<dyn EventStore>,
    pub announcements: Arc<dyn AnnouncementStore>,
    pool: Option<DatabasePool>,
}

impl DatabaseService {
    /// Postgres-backed service
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            events: Arc::new(EventRepository::new(pool.clone())),
            announcements: Arc::new(AnnouncementRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Process-local service with no external database
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            events: Arc::new(store.clone()),
            announcements: Arc::new(store),
            pool: None,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.pool.is_none()
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), AppError> {
        match &self.pool {
            Some(pool) => connection::health_check(pool).await,
            None => Ok(()),
        }
    }

    /// Moderation counters for the admin dashboard
    pub async fn get_moderation_stats(&self) -> Result<serde_json::Value, AppError> {
        let pending = self.events.count_by_status(EventStatus::Pending).await?;
        let approved = self.events.count_by_status(EventStatus::Approved).await?;
        let rejected = self.events.count_by_status(EventStatus::Rejected).await?;

        Ok(serde_json::json!({
            "events": {
                "pending": pending,
                "approved": approved,
                "rejected": rejected,
                "total": pending + approved + rejected,
            }
        }))
    }
}
