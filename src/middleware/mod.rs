//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod logging;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::{AuthUser, MaybeAuthUser};
pub use logging::trace_layer;
pub use rate_limit::SubmissionRateLimiter;
