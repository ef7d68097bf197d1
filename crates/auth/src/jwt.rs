//! JWT signing and validation helpers

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::SessionClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Sign a session token for `email`, issued at `issued_at` (unix seconds)
pub(crate) fn sign_session_token(
    email: &str,
    issued_at: i64,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let exp = issued_at + config.token_ttl.num_seconds();
    let claims = SessionClaims {
        email: email.to_string(),
        iat: issued_at.max(0) as u64,
        exp: exp.max(0) as u64,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
        tracing::error!(error = %e, "Failed to sign session token");
        AuthError::TokenCreation
    })
}

/// Validate signature and expiry of a session token
pub(crate) fn validate_session_token(
    token: &str,
    config: &AuthConfig,
) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_aud = false;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<SessionClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}
