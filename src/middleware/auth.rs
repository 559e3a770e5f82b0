//! Authentication extractors
//!
//! Resolves the session token carried by a request into an [`AuthContext`].
//! The token is read from `Authorization: Bearer ...` first, then from the
//! session cookie.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;
use crate::handlers::AppState;
use crate::services::auth::AuthContext;
use crate::utils::errors::AppError;

/// Signed-in caller; rejects the request with 401 when no valid session is present
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

/// Caller if signed in
///
/// A missing token yields `None`, but a token that fails verification is
/// still rejected so clients notice expired sessions.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthContext>);

impl MaybeAuthUser {
    pub fn as_ref(&self) -> Option<&AuthContext> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(context) = MaybeAuthUser::from_request_parts(parts, state).await?;
        context
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthenticated("A valid session is required".to_string()))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth = &state.services.auth_service;

        let token = match extract_token(parts, auth.cookie_name()) {
            Some(token) => token,
            None => {
                debug!(path = %parts.uri.path(), "Request without session token");
                return Ok(MaybeAuthUser(None));
            }
        };

        let context = auth.authenticate(&token).await?;
        Ok(MaybeAuthUser(Some(context)))
    }
}

/// Pull the raw token from the bearer header or the named cookie
pub fn extract_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty())
}
