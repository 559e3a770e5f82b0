//! Authentication service implementation
//!
//! This service verifies bearer-session tokens issued by the external auth
//! provider, provisions a profile on first sight and answers role-based
//! permission checks.

use std::collections::HashSet;
use std::sync::Arc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, debug};
use uuid::Uuid;
use crate::config::AuthConfig;
use crate::database::ProfileStore;
use crate::models::user::{CreateProfileRequest, Profile, UserRole};
use crate::models::event::Event;
use crate::utils::errors::{AppError, Result};
use crate::utils::logging::log_auth_failure;

/// Actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Submit and edit own pending events
    SubmitEvent,
    /// See pending/rejected events and review history
    ViewModeration,
    /// Approve or reject events
    ReviewEvents,
    /// Edit or delete any event
    ManageEvents,
    /// Create, publish, archive and delete announcements
    ManageAnnouncements,
    /// List users and change roles
    ManageUsers,
}

impl Permission {
    /// Permissions granted to a role
    pub fn for_role(role: UserRole) -> HashSet<Permission> {
        let mut permissions = HashSet::from([Permission::SubmitEvent]);
        match role {
            UserRole::User => {}
            UserRole::Reviewer => {
                permissions.insert(Permission::ViewModeration);
            }
            UserRole::Admin => {
                permissions.extend([
                    Permission::ViewModeration,
                    Permission::ReviewEvents,
                    Permission::ManageEvents,
                    Permission::ManageAnnouncements,
                    Permission::ManageUsers,
                ]);
            }
        }
        permissions
    }
}

/// Claims carried by the provider's access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<serde_json::Value>,
}

impl SessionClaims {
    /// Display name from the provider's user metadata, if any
    fn display_name(&self) -> Option<String> {
        let metadata = self.user_metadata.as_ref()?;
        ["full_name", "name"]
            .iter()
            .find_map(|key| metadata.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
    }
}

/// Authentication context for a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub permissions: HashSet<Permission>,
}

impl AuthContext {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            user_id: profile.id,
            email: profile.email.clone(),
            role: profile.role,
            permissions: Permission::for_role(profile.role),
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Require specific permission or return error
    pub fn require(&self, permission: Permission) -> Result<()> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "Role '{}' lacks required permission: {:?}",
                self.role, permission
            )))
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Whether this caller may see an event regardless of its status
    pub fn can_view_event(&self, event: &Event) -> bool {
        self.has_permission(Permission::ViewModeration) || event.is_owned_by(self.user_id)
    }
}

/// Authentication service for session verification and access control
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
    decoding_key: DecodingKey,
    validation: Validation,
    users: Arc<dyn ProfileStore>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: AuthConfig, users: Arc<dyn ProfileStore>) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience.as_str()]),
            None => validation.validate_aud = false,
        }

        Self {
            config,
            decoding_key,
            validation,
            users,
        }
    }

    /// Name of the cookie that may carry the access token
    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Verify the token signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log_auth_failure(&e.to_string(), None);
                AppError::Unauthenticated("Invalid or expired session".to_string())
            })
    }

    /// Resolve a token into an authentication context, provisioning the profile if needed
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext> {
        let claims = self.verify_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            log_auth_failure("subject is not a UUID", None);
            AppError::Unauthenticated("Invalid session subject".to_string())
        })?;

        let profile = match self.users.find_by_id(user_id).await? {
            Some(profile) => profile,
            None => self.provision_profile(user_id, &claims).await?,
        };

        let context = AuthContext::from_profile(&profile);
        debug!(user_id = %context.user_id, role = %context.role, "Authentication context created");
        Ok(context)
    }

    /// Create the local profile for a user seen for the first time
    async fn provision_profile(&self, user_id: Uuid, claims: &SessionClaims) -> Result<Profile> {
        let email = claims
            .email
            .clone()
            .ok_or_else(|| AppError::Unauthenticated("Session has no email claim".to_string()))?;

        let role = if self.is_bootstrap_admin(&email) {
            UserRole::Admin
        } else {
            UserRole::User
        };

        let profile = self
            .users
            .create_if_missing(CreateProfileRequest {
                id: user_id,
                email,
                name: claims.display_name(),
                role,
            })
            .await?;

        info!(user_id = %profile.id, role = %profile.role, "Profile provisioned");
        Ok(profile)
    }

    /// Emails configured to receive ADMIN on first sign-in
    pub fn is_bootstrap_admin(&self, email: &str) -> bool {
        self.config
            .admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }
}
