//! Authentication configuration

use chrono::Duration;
use curio_common::RuntimeMode;

/// Session tokens live for one hour
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Drives the cookie's `Secure` and `SameSite` attributes
    pub mode: RuntimeMode,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, mode: RuntimeMode) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            mode,
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }
}
