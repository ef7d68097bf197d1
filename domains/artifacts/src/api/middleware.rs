//! Artifacts domain state and token service integration

use axum::extract::FromRef;
use curio_auth::TokenService;

use crate::ArtifactsRepositories;

/// State for routes that need only the store
#[derive(Clone)]
pub struct ArtifactsState {
    pub repos: ArtifactsRepositories,
}

/// State for session routes and guarded routes
#[derive(Clone)]
pub struct SessionState {
    pub repos: ArtifactsRepositories,
    pub tokens: TokenService,
}

impl FromRef<SessionState> for TokenService {
    fn from_ref(state: &SessionState) -> Self {
        state.tokens.clone()
    }
}
