//! Axum extractors for authentication
//!
//! Generic over any state `S` where `TokenService: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::claims::SessionClaims;
use crate::cookie::SESSION_COOKIE_NAME;
use crate::error::AuthError;
use crate::service::TokenService;

/// Authenticated session extractor.
///
/// Reads the session cookie and verifies it; handlers taking this
/// argument only run for a valid, unexpired session and receive the
/// decoded claims directly.
#[derive(Debug, Clone)]
pub struct SessionUser(pub SessionClaims);

impl SessionUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Reject unless the session belongs to `email`
    pub fn require_owner(&self, email: &str) -> Result<(), AuthError> {
        if self.0.email == email {
            Ok(())
        } else {
            tracing::warn!(
                session_email = %self.0.email,
                requested_email = %email,
                "Session does not own requested scope"
            );
            Err(AuthError::Forbidden)
        }
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let tokens = TokenService::from_ref(state);

        let jar: CookieJar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
            tracing::warn!(path = %parts.uri.path(), "Request without session cookie");
            return Err(AuthError::MissingToken);
        };

        let claims = tokens.verify(cookie.value())?;

        Ok(SessionUser(claims))
    }
}
