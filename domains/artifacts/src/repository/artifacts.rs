//! Artifact repository

use std::sync::Arc;

use curio_common::{DeleteResult, InsertOneResult, Result, UpdateResult};
use uuid::Uuid;

use super::{DocumentCollection, Filter};
use crate::domain::discovery::{rank_featured, search_by_name};
use crate::domain::entities::{fields, ArtifactFields, Document};

#[derive(Clone)]
pub struct ArtifactRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl ArtifactRepository {
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    /// Store a new artifact exactly as submitted
    pub async fn create(&self, artifact: Document) -> Result<InsertOneResult> {
        self.collection.insert_one(artifact).await
    }

    /// All artifacts in store order
    pub async fn list(&self) -> Result<Vec<Document>> {
        self.collection.find_all().await
    }

    /// Find artifact by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Document>> {
        self.collection.find_by_id(id).await
    }

    /// Artifacts whose owner email equals `email`
    pub async fn list_by_owner(&self, email: &str) -> Result<Vec<Document>> {
        let filter = Filter::new().eq(fields::OWNER_EMAIL, email);
        self.collection.find_by_filter(&filter).await
    }

    /// Overwrite the fixed field set on artifact `id`, creating it if absent
    pub async fn update_fields(&self, id: Uuid, update: ArtifactFields) -> Result<UpdateResult> {
        self.collection.upsert_by_id(id, update.into_patch()).await
    }

    /// Delete an artifact
    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult> {
        self.collection.delete_by_id(id).await
    }

    /// Most-liked artifacts, computed over a full scan
    pub async fn featured(&self) -> Result<Vec<Document>> {
        Ok(rank_featured(self.collection.find_all().await?))
    }

    /// Artifacts whose name matches `keyword`, computed over a full scan
    pub async fn search(&self, keyword: &str) -> Result<Vec<Document>> {
        Ok(search_by_name(self.collection.find_all().await?, keyword))
    }
}
