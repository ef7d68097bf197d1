//! In-memory document collection
//!
//! Keeps documents in insertion order behind a mutex. Used by tests and
//! for running the API without a database. Every call through the
//! [`DocumentCollection`] interface is counted so tests can assert that a
//! handler never reached the store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use curio_common::{DeleteResult, Error, InsertOneResult, Result, UpdateResult};
use serde_json::Value;
use uuid::Uuid;

use super::{strip_id, DocumentCollection, Filter};
use crate::domain::entities::{Document, ID_FIELD};

#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    documents: Arc<Mutex<Vec<(Uuid, Document)>>>,
    operations: Arc<AtomicUsize>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of gateway operations served so far
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Number of stored documents (not counted as an operation)
    pub fn len(&self) -> usize {
        self.documents.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<(Uuid, Document)>>> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        self.documents
            .lock()
            .map_err(|_| Error::Internal("memory collection lock poisoned".to_string()))
    }
}

fn with_id(id: Uuid, doc: &Document) -> Document {
    let mut out = doc.clone();
    out.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    out
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn insert_one(&self, doc: Document) -> Result<InsertOneResult> {
        let id = Uuid::new_v4();
        self.lock()?.push((id, strip_id(doc)));
        Ok(InsertOneResult::new(id))
    }

    async fn find_all(&self) -> Result<Vec<Document>> {
        let docs = self.lock()?;
        Ok(docs.iter().map(|(id, doc)| with_id(*id, doc)).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>> {
        let docs = self.lock()?;
        Ok(docs
            .iter()
            .find(|(doc_id, _)| *doc_id == id)
            .map(|(doc_id, doc)| with_id(*doc_id, doc)))
    }

    async fn find_by_filter(&self, filter: &Filter) -> Result<Vec<Document>> {
        let docs = self.lock()?;
        Ok(docs
            .iter()
            .filter(|(_, doc)| filter.matches(doc))
            .map(|(id, doc)| with_id(*id, doc))
            .collect())
    }

    async fn upsert_by_id(&self, id: Uuid, patch: Document) -> Result<UpdateResult> {
        let patch = strip_id(patch);
        let mut docs = self.lock()?;

        match docs.iter_mut().find(|(doc_id, _)| *doc_id == id) {
            Some((_, doc)) => {
                let before = doc.clone();
                doc.extend(patch);
                Ok(UpdateResult::matched(*doc != before))
            }
            None => {
                docs.push((id, patch));
                Ok(UpdateResult::upserted(id))
            }
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<DeleteResult> {
        let mut docs = self.lock()?;
        let before = docs.len();
        docs.retain(|(doc_id, _)| *doc_id != id);
        Ok(DeleteResult::new((before - docs.len()) as u64))
    }

    async fn delete_one_by_filter(&self, filter: &Filter) -> Result<DeleteResult> {
        let mut docs = self.lock()?;
        match docs.iter().position(|(_, doc)| filter.matches(doc)) {
            Some(index) => {
                docs.remove(index);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }
}
