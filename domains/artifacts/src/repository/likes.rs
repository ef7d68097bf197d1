//! Like repository

use std::sync::Arc;

use curio_common::{DeleteResult, InsertOneResult, Result};

use super::{DocumentCollection, Filter};
use crate::domain::entities::{like_fields, Document};

#[derive(Clone)]
pub struct LikeRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl LikeRepository {
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    /// Store a like exactly as submitted. Duplicates are not rejected.
    pub async fn create(&self, like: Document) -> Result<InsertOneResult> {
        self.collection.insert_one(like).await
    }

    /// Likes of artifact `artifact_id` by `email`, in store order
    pub async fn find_for_user(&self, artifact_id: &str, email: &str) -> Result<Vec<Document>> {
        let filter = Filter::new()
            .eq(like_fields::ARTIFACT_ID, artifact_id)
            .eq(like_fields::USER_EMAIL, email);
        self.collection.find_by_filter(&filter).await
    }

    /// The user's like of an artifact, if any.
    ///
    /// Duplicate likes are possible; the earliest one is returned.
    pub async fn find_one_for_user(
        &self,
        artifact_id: &str,
        email: &str,
    ) -> Result<Option<Document>> {
        let mut likes = self.find_for_user(artifact_id, email).await?;

        if likes.len() > 1 {
            tracing::warn!(
                artifact_id,
                email,
                count = likes.len(),
                "Multiple likes for one user and artifact; returning the first"
            );
        }

        Ok((!likes.is_empty()).then(|| likes.swap_remove(0)))
    }

    /// Delete one like whose artifact reference is `artifact_id`
    pub async fn delete_by_artifact(&self, artifact_id: &str) -> Result<DeleteResult> {
        let filter = Filter::new().eq(like_fields::ARTIFACT_ID, artifact_id);
        self.collection.delete_one_by_filter(&filter).await
    }
}
