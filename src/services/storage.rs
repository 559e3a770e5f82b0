//! Object storage service implementation
//!
//! Mints time-limited signed URLs for event photos through the storage
//! provider's HTTP API. Photos themselves never pass through this service.

use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;
use crate::config::StorageConfig;
use crate::models::event::Photo;
use crate::utils::errors::{AppError, Result, StorageError, StorageResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

/// A photo with a URL the client can fetch directly
#[derive(Debug, Clone, Serialize)]
pub struct SignedPhoto {
    pub id: Uuid,
    pub caption: Option<String>,
    pub position: i32,
    pub url: String,
    pub expires_in: u64,
}

/// Storage service for signed photo URLs
#[derive(Clone, Debug)]
pub struct StorageService {
    client: Client,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new StorageService instance
    pub fn new(config: StorageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("ArtistCalendar/1.0")
            .build()
            .map_err(|e| AppError::Storage(StorageError::RequestFailed(e)))?;

        Ok(Self { client, config })
    }

    /// Check if storage is configured
    pub fn is_enabled(&self) -> bool {
        self.config.url.is_some() && self.config.service_key.is_some()
    }

    /// Request a signed URL for one object in the configured bucket
    pub async fn sign_path(&self, path: &str) -> StorageResult<String> {
        let (base_url, service_key) = match (&self.config.url, &self.config.service_key) {
            (Some(url), Some(key)) => (url.trim_end_matches('/'), key),
            _ => return Err(StorageError::NotConfigured),
        };

        let encoded_path = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let endpoint = format!(
            "{}/object/sign/{}/{}",
            base_url,
            urlencoding::encode(&self.config.bucket),
            encoded_path
        );

        debug!(path = path, "Requesting signed URL");

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(service_key)
            .header("apikey", service_key)
            .json(&SignRequest {
                expires_in: self.config.signed_url_ttl_seconds,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(path = path, status = status.as_u16(), "Storage refused to sign object");
            return Err(StorageError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let signed: SignResponse = response
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;

        if signed.signed_url.starts_with("http://") || signed.signed_url.starts_with("https://") {
            Ok(signed.signed_url)
        } else {
            Ok(format!("{}/{}", base_url, signed.signed_url.trim_start_matches('/')))
        }
    }

    /// Sign every photo of an event, preserving order
    pub async fn sign_photos(&self, photos: &[Photo]) -> Result<Vec<SignedPhoto>> {
        let mut signed = Vec::with_capacity(photos.len());
        for photo in photos {
            let url = self.sign_path(&photo.storage_path).await?;
            signed.push(SignedPhoto {
                id: photo.id,
                caption: photo.caption.clone(),
                position: photo.position,
                url,
                expires_in: self.config.signed_url_ttl_seconds,
            });
        }
        Ok(signed)
    }
}
