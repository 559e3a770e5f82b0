//! Announcement service implementation
//!
//! Site-wide notices managed by admins. Anyone may read the active set;
//! drafts and archived notices are only listed for admins.

use std::sync::Arc;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use crate::database::AnnouncementStore;
use crate::models::announcement::{
    Announcement, CreateAnnouncementRequest, NewAnnouncement, UpdateAnnouncementRequest,
};
use crate::services::auth::{AuthContext, Permission};
use crate::services::validation::{validate_announcement, validate_announcement_update};
use crate::utils::errors::{AppError, Result};
use crate::utils::logging::log_admin_action;

#[derive(Clone)]
pub struct AnnouncementService {
    announcements: Arc<dyn AnnouncementStore>,
}

impl AnnouncementService {
    pub fn new(announcements: Arc<dyn AnnouncementStore>) -> Self {
        Self { announcements }
    }

    pub async fn create(&self, request: CreateAnnouncementRequest, caller: &AuthContext) -> Result<Announcement> {
        caller.require(Permission::ManageAnnouncements)?;
        validate_announcement(&request)?;

        let announcement = self
            .announcements
            .create(NewAnnouncement {
                title: request.title.trim().to_string(),
                content: request.content.trim().to_string(),
                announcement_type: request.announcement_type,
                published_at: request.publish.then(Utc::now),
                author_id: caller.user_id,
            })
            .await?;

        log_admin_action(caller.user_id, "create_announcement", Some(&announcement.id.to_string()), None);
        Ok(announcement)
    }

    /// List announcements
    ///
    /// `active = Some(false)` (everything) is only honoured for admins;
    /// everyone else gets the active set.
    pub async fn list(&self, active: Option<bool>, caller: Option<&AuthContext>) -> Result<Vec<Announcement>> {
        let can_manage = caller.map_or(false, |c| c.has_permission(Permission::ManageAnnouncements));
        let active_only = !can_manage || active.unwrap_or(false);

        self.announcements
            .list(active_only.then(Utc::now))
            .await
    }

    pub async fn update(&self, id: Uuid, request: UpdateAnnouncementRequest, caller: &AuthContext) -> Result<Announcement> {
        caller.require(Permission::ManageAnnouncements)?;
        validate_announcement_update(&request)?;
        self.ensure_exists(id).await?;

        let request = UpdateAnnouncementRequest {
            title: request.title.map(|t| t.trim().to_string()),
            content: request.content.map(|c| c.trim().to_string()),
            announcement_type: request.announcement_type,
        };
        let announcement = self.announcements.update(id, request).await?;

        log_admin_action(caller.user_id, "update_announcement", Some(&id.to_string()), None);
        Ok(announcement)
    }

    /// Publish now; republishing an archived notice brings it back
    pub async fn publish(&self, id: Uuid, caller: &AuthContext) -> Result<Announcement> {
        caller.require(Permission::ManageAnnouncements)?;
        self.ensure_exists(id).await?;

        let announcement = self.announcements.set_published(id, Utc::now()).await?;
        info!(announcement_id = %id, "Announcement published");
        log_admin_action(caller.user_id, "publish_announcement", Some(&id.to_string()), None);
        Ok(announcement)
    }

    pub async fn archive(&self, id: Uuid, caller: &AuthContext) -> Result<Announcement> {
        caller.require(Permission::ManageAnnouncements)?;
        let existing = self.ensure_exists(id).await?;
        if existing.archived_at.is_some() {
            return Ok(existing);
        }

        let announcement = self.announcements.set_archived(id, Utc::now()).await?;
        info!(announcement_id = %id, "Announcement archived");
        log_admin_action(caller.user_id, "archive_announcement", Some(&id.to_string()), None);
        Ok(announcement)
    }

    pub async fn delete(&self, id: Uuid, caller: &AuthContext) -> Result<()> {
        caller.require(Permission::ManageAnnouncements)?;

        if !self.announcements.delete(id).await? {
            return Err(AppError::AnnouncementNotFound { announcement_id: id });
        }

        log_admin_action(caller.user_id, "delete_announcement", Some(&id.to_string()), None);
        Ok(())
    }

    async fn ensure_exists(&self, id: Uuid) -> Result<Announcement> {
        self.announcements
            .find_by_id(id)
            .await?
            .ok_or(AppError::AnnouncementNotFound { announcement_id: id })
    }
}
