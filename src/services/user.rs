//! User service implementation
//!
//! This service handles the caller's own profile and admin role management.

use std::sync::Arc;
use tracing::{info, warn, debug};
use uuid::Uuid;
use crate::database::ProfileStore;
use crate::models::user::{Profile, UpdateProfileRequest, UserRole};
use crate::services::auth::{AuthContext, Permission};
use crate::utils::errors::{AppError, FieldIssue, Result};
use crate::utils::helpers::normalize_whitespace;
use crate::utils::logging::log_admin_action;

pub const MAX_NAME_LEN: usize = 120;

/// User service for profile operations
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn ProfileStore>,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(users: Arc<dyn ProfileStore>) -> Self {
        Self { users }
    }

    /// Profile of the signed-in caller
    pub async fn me(&self, caller: &AuthContext) -> Result<Profile> {
        debug!(user_id = %caller.user_id, "Getting own profile");
        self.get(caller.user_id).await
    }

    /// Update the caller's display name or artist status
    pub async fn update_me(&self, request: UpdateProfileRequest, caller: &AuthContext) -> Result<Profile> {
        let name = match request.name {
            Some(name) => {
                let name = normalize_whitespace(&name);
                if name.is_empty() {
                    return Err(AppError::invalid_field("name", "must not be blank"));
                }
                if name.chars().count() > MAX_NAME_LEN {
                    return Err(AppError::Validation(vec![FieldIssue::new(
                        "name",
                        format!("must be at most {} characters", MAX_NAME_LEN),
                    )]));
                }
                Some(name)
            }
            None => None,
        };

        let profile = self
            .users
            .update(
                caller.user_id,
                UpdateProfileRequest {
                    name,
                    artist_status: request.artist_status,
                },
            )
            .await?;

        info!(user_id = %profile.id, "Profile updated");
        Ok(profile)
    }

    pub async fn list_users(&self, caller: &AuthContext, limit: i64, offset: i64) -> Result<Vec<Profile>> {
        caller.require(Permission::ManageUsers)?;
        self.users.list(limit, offset).await
    }

    /// Change a user's role; admins cannot demote themselves
    pub async fn set_role(&self, user_id: Uuid, role: UserRole, caller: &AuthContext) -> Result<Profile> {
        caller.require(Permission::ManageUsers)?;

        if user_id == caller.user_id && role != UserRole::Admin {
            warn!(user_id = %user_id, "Admin attempted to demote themselves");
            return Err(AppError::InvalidInput("Admins cannot remove their own admin role".to_string()));
        }

        let existing = self.get(user_id).await?;
        if existing.role == role {
            return Ok(existing);
        }

        let profile = self.users.update_role(user_id, role).await?;
        log_admin_action(
            caller.user_id,
            "set_role",
            Some(&user_id.to_string()),
            Some(&format!("{} -> {}", existing.role, role)),
        );
        Ok(profile)
    }

    async fn get(&self, user_id: Uuid) -> Result<Profile> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound { user_id })
    }
}
