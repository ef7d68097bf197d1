//! Persistence gateway for the Artifacts domain
//!
//! Both collections (artifacts, likes) sit behind [`DocumentCollection`],
//! a small document-store interface with a Postgres implementation for
//! deployments and an in-memory one for tests and database-less runs.

pub mod artifacts;
pub mod likes;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use curio_common::{DeleteResult, InsertOneResult, Result, UpdateResult};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Document;

pub use artifacts::ArtifactRepository;
pub use likes::LikeRepository;
pub use memory::MemoryCollection;
pub use postgres::PgCollection;

/// Table backing the artifact collection
pub const ARTIFACTS_TABLE: &str = "artifacts";
/// Table backing the like collection
pub const LIKES_TABLE: &str = "likes";

/// Field-equality filter. A document matches when every listed field is
/// present with an equal value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }

    /// Filter as a JSON object, suitable for JSONB containment
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Operations exposed per collection.
///
/// Documents come back with their store identifier under `_id`. An `_id`
/// supplied by the caller is never stored.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Store `doc` under a freshly generated identifier
    async fn insert_one(&self, doc: Document) -> Result<InsertOneResult>;

    /// All documents in insertion order
    async fn find_all(&self) -> Result<Vec<Document>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>>;

    /// Matching documents in insertion order
    async fn find_by_filter(&self, filter: &Filter) -> Result<Vec<Document>>;

    /// Merge `patch` into the document `id`, or create it from `patch` if
    /// there is none
    async fn upsert_by_id(&self, id: Uuid, patch: Document) -> Result<UpdateResult>;

    async fn delete_by_id(&self, id: Uuid) -> Result<DeleteResult>;

    /// Delete the earliest-inserted matching document, if any
    async fn delete_one_by_filter(&self, filter: &Filter) -> Result<DeleteResult>;
}

/// Combined repository access for the Artifacts domain
#[derive(Clone)]
pub struct ArtifactsRepositories {
    pub artifacts: ArtifactRepository,
    pub likes: LikeRepository,
}

impl ArtifactsRepositories {
    /// Repositories over Postgres tables sharing one pool
    pub fn new(pool: PgPool) -> Self {
        Self::from_collections(
            Arc::new(PgCollection::new(pool.clone(), ARTIFACTS_TABLE)),
            Arc::new(PgCollection::new(pool, LIKES_TABLE)),
        )
    }

    /// Repositories over fresh in-memory collections
    pub fn in_memory() -> Self {
        Self::from_collections(
            Arc::new(MemoryCollection::new()),
            Arc::new(MemoryCollection::new()),
        )
    }

    pub fn from_collections(
        artifacts: Arc<dyn DocumentCollection>,
        likes: Arc<dyn DocumentCollection>,
    ) -> Self {
        Self {
            artifacts: ArtifactRepository::new(artifacts),
            likes: LikeRepository::new(likes),
        }
    }
}

/// Drop any caller-supplied identifier before a document is stored
pub(crate) fn strip_id(mut doc: Document) -> Document {
    doc.remove(crate::domain::entities::ID_FIELD);
    doc
}
