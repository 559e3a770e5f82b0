//! Rate limiting middleware
//!
//! Per-user throttling of event submissions so a single account cannot
//! flood the moderation queue.

use std::num::NonZeroU32;
use std::sync::Arc;
use governor::{
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use tracing::{debug, warn};
use uuid::Uuid;
use crate::config::RateLimitConfig;
use crate::services::auth::AuthContext;
use crate::utils::errors::{AppError, Result};

type KeyedLimiter = RateLimiter<Uuid, DefaultKeyedStateStore<Uuid>, DefaultClock>;

/// Keyed limiter for submissions
#[derive(Clone)]
pub struct SubmissionRateLimiter {
    limiter: Arc<KeyedLimiter>,
    admin_exempt: bool,
}

impl SubmissionRateLimiter {
    /// Create a new SubmissionRateLimiter from configuration
    pub fn new(config: &RateLimitConfig) -> Result<Self> {
        let per_minute = NonZeroU32::new(config.submissions_per_minute)
            .ok_or_else(|| AppError::Config("rate_limit.submissions_per_minute must be positive".to_string()))?;
        let burst = NonZeroU32::new(config.burst)
            .ok_or_else(|| AppError::Config("rate_limit.burst must be positive".to_string()))?;

        let quota = Quota::per_minute(per_minute).allow_burst(burst);

        Ok(Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            admin_exempt: config.admin_exempt,
        })
    }

    /// Check and consume one submission for the caller
    pub fn check(&self, caller: &AuthContext) -> Result<()> {
        if self.admin_exempt && caller.is_admin() {
            debug!(user_id = %caller.user_id, "Admin exempt from submission rate limit");
            return Ok(());
        }

        match self.limiter.check_key(&caller.user_id) {
            Ok(()) => Ok(()),
            Err(_) => {
                warn!(user_id = %caller.user_id, "Submission rate limit exceeded");
                Err(AppError::RateLimitExceeded)
            }
        }
    }

    /// Drop state for keys that are back to full capacity
    pub fn cleanup(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }
}
