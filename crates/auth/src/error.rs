//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    /// No session cookie on the request
    MissingToken,
    /// Malformed, expired, or badly signed token
    InvalidToken,
    /// Authenticated, but not the owner of the requested scope
    Forbidden,
    TokenCreation,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Rendered through the common error envelope, so guard rejections from
/// the extractor and from handlers look the same on the wire.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        curio_common::Error::from(self).into_response()
    }
}

impl From<AuthError> for curio_common::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken => {
                curio_common::Error::Authentication("unauthorized access".to_string())
            }
            AuthError::Forbidden => {
                curio_common::Error::Authorization("forbidden access".to_string())
            }
            AuthError::TokenCreation => {
                curio_common::Error::Internal("failed to sign session token".to_string())
            }
        }
    }
}
