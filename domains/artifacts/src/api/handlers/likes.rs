//! Like API handlers
//!
//! Implements:
//! - POST   /likes              — Record a like as submitted
//! - GET    /likes?email=&id=   — The user's like of an artifact, or `null`
//! - DELETE /likes/{id}         — Delete a like by its artifact reference

use axum::{extract::State, Json};
use curio_common::{DeleteResult, Error, InsertOneResult, JsonBody, PathParam, QueryParams, Result};
use serde::Deserialize;

use crate::api::middleware::ArtifactsState;
use crate::domain::entities::Document;

#[derive(Debug, Deserialize)]
pub struct LikeQuery {
    pub email: Option<String>,
    /// Artifact reference
    pub id: Option<String>,
}

pub async fn create_like(
    State(state): State<ArtifactsState>,
    JsonBody(like): JsonBody<Document>,
) -> Result<Json<InsertOneResult>> {
    let result = state.repos.likes.create(like).await?;
    Ok(Json(result))
}

pub async fn get_like(
    State(state): State<ArtifactsState>,
    QueryParams(query): QueryParams<LikeQuery>,
) -> Result<Json<Option<Document>>> {
    let (Some(email), Some(artifact_id)) = (query.email, query.id) else {
        return Err(Error::Validation(
            "email and id query parameters are required".to_string(),
        ));
    };

    let like = state
        .repos
        .likes
        .find_one_for_user(&artifact_id, &email)
        .await?;
    Ok(Json(like))
}

pub async fn delete_like(
    State(state): State<ArtifactsState>,
    PathParam(artifact_id): PathParam<String>,
) -> Result<Json<DeleteResult>> {
    let result = state.repos.likes.delete_by_artifact(&artifact_id).await?;
    Ok(Json(result))
}
