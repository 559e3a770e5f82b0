//! Error handling for ArtistCalendar
//!
//! This module defines the main error types used throughout the application
//! and how they are rendered as JSON error envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Main error type for ArtistCalendar application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed")]
    Validation(Vec<FieldIssue>),

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Announcement not found: {announcement_id}")]
    AnnouncementNotFound { announcement_id: Uuid },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: Uuid },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Object storage specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Storage returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid storage response: {0}")]
    InvalidResponse(String),

    #[error("Storage is not configured")]
    NotConfigured,
}

/// Result type alias for ArtistCalendar operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl AppError {
    /// Shorthand for a validation failure on a single field
    pub fn invalid_field(field: &str, message: &str) -> Self {
        AppError::Validation(vec![FieldIssue::new(field, message)])
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::EventNotFound { .. }
            | AppError::AnnouncementNotFound { .. }
            | AppError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidStateTransition { .. } => StatusCode::CONFLICT,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::Storage(StorageError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Storage(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_FAILED",
            AppError::InvalidInput(_) => "BAD_REQUEST",
            AppError::Unauthenticated(_) => "UNAUTHENTICATED",
            AppError::PermissionDenied(_) => "FORBIDDEN",
            AppError::EventNotFound { .. }
            | AppError::AnnouncementNotFound { .. }
            | AppError::UserNotFound { .. } => "NOT_FOUND",
            AppError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            AppError::RateLimitExceeded => "RATE_LIMITED",
            AppError::Storage(_) => "STORAGE_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Database(_) => ErrorSeverity::Critical,
            AppError::Migration(_) => ErrorSeverity::Critical,
            AppError::Config(_) => ErrorSeverity::Critical,
            AppError::PermissionDenied(_) => ErrorSeverity::Warning,
            AppError::Unauthenticated(_) => ErrorSeverity::Warning,
            AppError::RateLimitExceeded => ErrorSeverity::Warning,
            AppError::Validation(_) => ErrorSeverity::Info,
            AppError::InvalidInput(_) => ErrorSeverity::Info,
            AppError::EventNotFound { .. } => ErrorSeverity::Info,
            AppError::AnnouncementNotFound { .. } => ErrorSeverity::Info,
            AppError::UserNotFound { .. } => ErrorSeverity::Info,
            AppError::InvalidStateTransition { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let severity = self.severity();

        match severity {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                let severity = severity.to_string();
                crate::utils::logging::log_api_error(code, &self.to_string(), Some(&severity));
            }
            ErrorSeverity::Warning => warn!(code = code, error = %self, "Request rejected"),
            ErrorSeverity::Info => debug!(code = code, error = %self, "Request rejected"),
        }

        // Server-side failures are reported generically
        let message = if status.is_server_error() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = match self {
            AppError::Validation(issues) => json!({
                "error": {
                    "code": code,
                    "message": message,
                    "issues": issues,
                }
            }),
            _ => json!({
                "error": {
                    "code": code,
                    "message": message,
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
