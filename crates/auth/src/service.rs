//! Token service
//!
//! Owns the auth configuration and is the single place tokens are issued
//! and verified. Domain states expose it via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for TokenService {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.tokens.clone()
//!     }
//! }
//! ```

use axum_extra::extract::cookie::Cookie;

use crate::claims::SessionClaims;
use crate::config::AuthConfig;
use crate::cookie::{removal_cookie, session_cookie};
use crate::error::AuthError;
use crate::jwt::{sign_session_token, validate_session_token};

#[derive(Debug, Clone)]
pub struct TokenService {
    config: AuthConfig,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Sign a token for `email` valid for the configured lifetime
    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        sign_session_token(email, chrono::Utc::now().timestamp(), &self.config)
    }

    /// Sign a token and wrap it in the session cookie
    pub fn issue_cookie(&self, email: &str) -> Result<Cookie<'static>, AuthError> {
        let token = self.issue(email)?;
        Ok(session_cookie(token, self.config.mode))
    }

    /// Cookie that clears the session on the client
    pub fn clear_cookie(&self) -> Cookie<'static> {
        removal_cookie(self.config.mode)
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        validate_session_token(token, &self.config)
    }
}
