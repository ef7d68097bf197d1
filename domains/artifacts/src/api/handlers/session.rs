//! Session API handlers
//!
//! Implements:
//! - POST   /session — Issue a session token in the `artifactToken` cookie
//! - DELETE /session — Clear the session cookie

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use curio_common::{JsonBody, Result};
use serde::{Deserialize, Serialize};

use crate::api::middleware::SessionState;

/// Claim submitted by the client after signing in
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub email: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SessionResponse {
    pub success: bool,
}

pub async fn create_session(
    State(state): State<SessionState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<SessionRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let cookie = state.tokens.issue_cookie(&req.email)?;
    tracing::info!(email = %req.email, "Session issued");

    Ok((jar.add(cookie), Json(SessionResponse { success: true })))
}

pub async fn end_session(
    State(state): State<SessionState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    (
        jar.add(state.tokens.clear_cookie()),
        Json(SessionResponse { success: true }),
    )
}
