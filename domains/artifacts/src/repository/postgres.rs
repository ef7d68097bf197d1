//! Postgres document collection
//!
//! Each collection is a table of `(id UUID, seq BIGINT, doc JSONB)`. The
//! document is stored verbatim; `seq` preserves insertion order. Uses
//! runtime `sqlx::query_as` (not macros) so the table name can be chosen
//! per collection.

use async_trait::async_trait;
use curio_common::{DeleteResult, InsertOneResult, RepositoryError, Result, UpdateResult};
use serde_json::Value;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::{strip_id, DocumentCollection, Filter};
use crate::domain::entities::{Document, ID_FIELD};

/// Row type for document reads
#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    doc: Json<Value>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = RepositoryError;

    fn try_from(row: DocumentRow) -> std::result::Result<Self, Self::Error> {
        match row.doc.0 {
            Value::Object(mut doc) => {
                doc.insert(ID_FIELD.to_string(), Value::String(row.id.to_string()));
                Ok(doc)
            }
            other => Err(RepositoryError::InvalidData(format!(
                "document {} is a {} rather than an object",
                row.id,
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn into_documents(rows: Vec<DocumentRow>) -> Result<Vec<Document>> {
    rows.into_iter()
        .map(|row| Document::try_from(row).map_err(Into::into))
        .collect()
}

#[derive(Clone)]
pub struct PgCollection {
    pool: PgPool,
    table: &'static str,
}

impl PgCollection {
    /// `table` must be one of the tables created by the migrations
    pub fn new(pool: PgPool, table: &'static str) -> Self {
        Self { pool, table }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }
}

#[async_trait]
impl DocumentCollection for PgCollection {
    async fn insert_one(&self, doc: Document) -> Result<InsertOneResult> {
        let id = Uuid::new_v4();
        let query = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table);

        sqlx::query(&query)
            .bind(id)
            .bind(Json(Value::Object(strip_id(doc))))
            .execute(&self.pool)
            .await?;

        tracing::debug!(table = self.table, %id, "Inserted document");
        Ok(InsertOneResult::new(id))
    }

    async fn find_all(&self) -> Result<Vec<Document>> {
        let query = format!("SELECT id, doc FROM {} ORDER BY seq", self.table);
        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        into_documents(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>> {
        let query = format!("SELECT id, doc FROM {} WHERE id = $1", self.table);
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Document::try_from).transpose()?)
    }

    async fn find_by_filter(&self, filter: &Filter) -> Result<Vec<Document>> {
        let query = format!(
            "SELECT id, doc FROM {} WHERE doc @> $1 ORDER BY seq",
            self.table
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(Json(filter.to_json()))
            .fetch_all(&self.pool)
            .await?;

        into_documents(rows)
    }

    async fn upsert_by_id(&self, id: Uuid, patch: Document) -> Result<UpdateResult> {
        // xmax is zero only for a freshly inserted row version. A patch that
        // leaves the document unchanged skips the update and returns no row.
        let query = format!(
            "INSERT INTO {table} (id, doc) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET doc = {table}.doc || EXCLUDED.doc \
             WHERE {table}.doc IS DISTINCT FROM {table}.doc || EXCLUDED.doc \
             RETURNING (xmax = 0) AS inserted",
            table = self.table
        );
        let inserted = sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .bind(Json(Value::Object(strip_id(patch))))
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(table = self.table, %id, ?inserted, "Upserted document");

        Ok(match inserted {
            Some(true) => UpdateResult::upserted(id),
            Some(false) => UpdateResult::matched(true),
            None => UpdateResult::matched(false),
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<DeleteResult> {
        let query = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }

    async fn delete_one_by_filter(&self, filter: &Filter) -> Result<DeleteResult> {
        let query = format!(
            "DELETE FROM {table} WHERE id = \
             (SELECT id FROM {table} WHERE doc @> $1 ORDER BY seq LIMIT 1)",
            table = self.table
        );
        let result = sqlx::query(&query)
            .bind(Json(filter.to_json()))
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }
}
