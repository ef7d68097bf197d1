//! Route definitions for Artifacts domain API

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use curio_auth::TokenService;

use super::handlers::{artifacts, likes, session};
use super::middleware::{ArtifactsState, SessionState};
use crate::ArtifactsRepositories;

/// Create artifact catalog routes
fn artifact_routes() -> Router<ArtifactsState> {
    Router::new()
        .route(
            "/artifacts",
            get(artifacts::list_artifacts).post(artifacts::create_artifact),
        )
        .route(
            "/artifacts/{id}",
            get(artifacts::get_artifact).delete(artifacts::delete_artifact),
        )
        .route("/artifacts/mine/{id}", patch(artifacts::update_my_artifact))
}

/// Create featured and search routes
fn discovery_routes() -> Router<ArtifactsState> {
    Router::new()
        .route("/artifacts/featured", get(artifacts::featured_artifacts))
        .route("/artifacts/search", get(artifacts::search_artifacts))
}

/// Create like routes
fn like_routes() -> Router<ArtifactsState> {
    Router::new()
        .route("/likes", get(likes::get_like).post(likes::create_like))
        .route("/likes/{id}", delete(likes::delete_like))
}

/// Owner listing without a session guard
fn open_owner_routes() -> Router<ArtifactsState> {
    Router::new().route("/artifacts/mine", get(artifacts::list_artifacts_by_owner))
}

/// Session issue/clear plus the guarded owner listing
fn session_routes() -> Router<SessionState> {
    Router::new()
        .route(
            "/session",
            post(session::create_session).delete(session::end_session),
        )
        .route("/artifacts/mine", get(artifacts::list_my_artifacts))
}

/// Create all Artifacts domain API routes.
///
/// With `tokens` present the session routes are mounted and
/// `/artifacts/mine` requires a session; without it the listing is open.
/// `discovery` toggles the featured and search routes.
pub fn routes(
    repos: ArtifactsRepositories,
    tokens: Option<TokenService>,
    discovery: bool,
) -> Router {
    let mut catalog = artifact_routes().merge(like_routes());
    if discovery {
        catalog = catalog.merge(discovery_routes());
    }

    let router = match tokens {
        Some(tokens) => Router::new().merge(
            session_routes().with_state(SessionState {
                repos: repos.clone(),
                tokens,
            }),
        ),
        None => Router::new().merge(open_owner_routes().with_state(ArtifactsState {
            repos: repos.clone(),
        })),
    };

    router.merge(catalog.with_state(ArtifactsState { repos }))
}
