//! Artifact catalog API handlers
//!
//! Implements:
//! - POST   /artifacts              — Insert an artifact as submitted
//! - GET    /artifacts              — List all artifacts
//! - GET    /artifacts/{id}         — Fetch one artifact (`null` if absent)
//! - DELETE /artifacts/{id}         — Delete one artifact
//! - GET    /artifacts/mine?email=  — Artifacts owned by `email`
//! - PATCH  /artifacts/mine/{id}    — Overwrite the fixed field set (upsert)
//! - GET    /artifacts/featured     — Six most-liked artifacts
//! - GET    /artifacts/search?name= — Name search

use axum::{extract::State, Json};
use curio_auth::SessionUser;
use curio_common::{
    DeleteResult, Error, InsertOneResult, JsonBody, PathParam, QueryParams, Result, UpdateResult,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::{ArtifactsState, SessionState};
use crate::domain::entities::{ArtifactFields, Document};

/// Query for owner-scoped listing
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
}

impl OwnerQuery {
    fn email(self) -> Result<String> {
        self.email
            .ok_or_else(|| Error::Validation("email query parameter is required".to_string()))
    }
}

/// Query for name search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

/// Insert a new artifact
pub async fn create_artifact(
    State(state): State<ArtifactsState>,
    JsonBody(artifact): JsonBody<Document>,
) -> Result<Json<InsertOneResult>> {
    let result = state.repos.artifacts.create(artifact).await?;
    tracing::info!(artifact_id = %result.inserted_id, "Artifact created");
    Ok(Json(result))
}

/// List all artifacts
pub async fn list_artifacts(State(state): State<ArtifactsState>) -> Result<Json<Vec<Document>>> {
    let artifacts = state.repos.artifacts.list().await?;
    Ok(Json(artifacts))
}

/// Get a single artifact by ID; an unknown ID yields `null`
pub async fn get_artifact(
    State(state): State<ArtifactsState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Option<Document>>> {
    let artifact = state.repos.artifacts.find(id).await?;
    Ok(Json(artifact))
}

/// List artifacts owned by the session's user.
///
/// The requested email must match the session; a mismatch is rejected
/// before the store is touched.
pub async fn list_my_artifacts(
    user: SessionUser,
    State(state): State<SessionState>,
    QueryParams(query): QueryParams<OwnerQuery>,
) -> Result<Json<Vec<Document>>> {
    let email = query.email()?;
    user.require_owner(&email)?;

    let artifacts = state.repos.artifacts.list_by_owner(&email).await?;
    Ok(Json(artifacts))
}

/// List artifacts owned by `email` without a session check
pub async fn list_artifacts_by_owner(
    State(state): State<ArtifactsState>,
    QueryParams(query): QueryParams<OwnerQuery>,
) -> Result<Json<Vec<Document>>> {
    let email = query.email()?;
    let artifacts = state.repos.artifacts.list_by_owner(&email).await?;
    Ok(Json(artifacts))
}

/// Delete an artifact
pub async fn delete_artifact(
    State(state): State<ArtifactsState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<DeleteResult>> {
    let result = state.repos.artifacts.delete(id).await?;
    tracing::info!(artifact_id = %id, deleted = result.deleted_count, "Artifact delete");
    Ok(Json(result))
}

/// Overwrite an artifact's editable fields, creating it if absent
pub async fn update_my_artifact(
    State(state): State<ArtifactsState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(update): JsonBody<ArtifactFields>,
) -> Result<Json<UpdateResult>> {
    let result = state.repos.artifacts.update_fields(id, update).await?;
    Ok(Json(result))
}

/// Most-liked artifacts
pub async fn featured_artifacts(
    State(state): State<ArtifactsState>,
) -> Result<Json<Vec<Document>>> {
    let artifacts = state.repos.artifacts.featured().await?;
    Ok(Json(artifacts))
}

/// Artifacts whose name matches the `name` keyword
pub async fn search_artifacts(
    State(state): State<ArtifactsState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Json<Vec<Document>>> {
    let keyword = query
        .name
        .ok_or_else(|| Error::Validation("name query parameter is required".to_string()))?;

    let artifacts = state.repos.artifacts.search(&keyword).await?;
    Ok(Json(artifacts))
}
