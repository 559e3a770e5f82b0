//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{AppError, Result};
use crate::utils::helpers::is_valid_http_url;
use super::Settings;

/// Minimum length accepted for the session signing secret
const MIN_JWT_SECRET_LEN: usize = 32;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_storage_config(&settings.storage)?;
    validate_rate_limit_config(&settings.rate_limit)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(AppError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(AppError::Config("Server port must be greater than 0".to_string()));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.in_memory {
        return Ok(());
    }

    if config.url.is_empty() {
        return Err(AppError::Config("Database URL is required".to_string()));
    }

    if !config.url.starts_with("postgres://") && !config.url.starts_with("postgresql://") {
        return Err(AppError::Config(
            "Database URL must be a PostgreSQL connection string".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(AppError::Config(
            "Database max_connections must be greater than 0".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(AppError::Config(
            "Database acquire_timeout_seconds must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(AppError::Config(
            "Database min_connections cannot be greater than max_connections".to_string()
        ));
    }

    Ok(())
}

/// Validate auth configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.len() < MIN_JWT_SECRET_LEN {
        return Err(AppError::Config(format!(
            "JWT secret must be at least {} characters",
            MIN_JWT_SECRET_LEN
        )));
    }

    if config.cookie_name.is_empty() {
        return Err(AppError::Config("Session cookie name is required".to_string()));
    }

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if let Some(url) = &config.url {
        if !is_valid_http_url(url) {
            return Err(AppError::Config(format!("Invalid storage URL: {}", url)));
        }

        if config.service_key.as_deref().map_or(true, str::is_empty) {
            return Err(AppError::Config(
                "Storage service key is required when a storage URL is set".to_string()
            ));
        }
    }

    if config.bucket.is_empty() {
        return Err(AppError::Config("Storage bucket is required".to_string()));
    }

    if config.signed_url_ttl_seconds == 0 {
        return Err(AppError::Config(
            "Signed URL TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate rate limit configuration
fn validate_rate_limit_config(config: &super::RateLimitConfig) -> Result<()> {
    if config.submissions_per_minute == 0 {
        return Err(AppError::Config(
            "submissions_per_minute must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(AppError::Config("Log level is required".to_string()));
    }

    Ok(())
}
