//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; empty allows any origin without credentials
    pub allowed_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Use the process-local store instead of Postgres
    pub in_memory: bool,
}

/// Session verification configuration for the external auth provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub cookie_name: String,
    /// Expected `aud` claim, if the provider sets one
    pub audience: Option<String>,
    /// Emails granted ADMIN the first time their profile is provisioned
    pub admin_emails: Vec<String>,
}

/// Object storage configuration for event photos
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Base URL of the storage API, e.g. `https://xyz.supabase.co/storage/v1`
    pub url: Option<String>,
    pub service_key: Option<String>,
    pub bucket: String,
    pub signed_url_ttl_seconds: u64,
    pub timeout_seconds: u64,
}

/// Submission rate limit configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub submissions_per_minute: u32,
    pub burst: u32,
    /// Skip the limit for admins
    pub admin_exempt: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub directory: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("ARTCAL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.admin_emails")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::AppError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                allowed_origins: vec![],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/artist_calendar".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
                in_memory: false,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                cookie_name: "sb-access-token".to_string(),
                audience: Some("authenticated".to_string()),
                admin_emails: vec![],
            },
            storage: StorageConfig {
                url: None,
                service_key: None,
                bucket: "event-photos".to_string(),
                signed_url_ttl_seconds: 3600,
                timeout_seconds: 10,
            },
            rate_limit: RateLimitConfig {
                submissions_per_minute: 5,
                burst: 5,
                admin_exempt: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
                json: false,
            },
        }
    }
}
