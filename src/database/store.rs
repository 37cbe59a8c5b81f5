use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::models::CollectionSchema;
use crate::filter::{Filter, FilterError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),

    #[error("Duplicate value violates unique index {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(DatabaseError::Sqlx(err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Repository over named collections of JSON documents.
///
/// Documents are JSON objects keyed by a string `_id`. Every read and write
/// that targets user data goes through a `Filter` carrying the owner scope;
/// `id` lookups are additionally constrained by that scope.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return it as persisted (with `createdAt`/`updatedAt`)
    async fn insert(&self, collection: &str, doc: Value) -> Result<Value, StoreError>;

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    async fn get(&self, collection: &str, id: &str, scope: &Filter) -> Result<Option<Value>, StoreError>;

    /// Shallow-merge `patch` into the document. `_id` and `createdAt` are never overwritten.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        scope: &Filter,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError>;

    async fn delete(&self, collection: &str, id: &str, scope: &Filter) -> Result<bool, StoreError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Remove every document. A collection that was never created counts as 0.
    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError>;

    /// Create the collection and its declared indexes if missing
    async fn ensure_collection(&self, schema: &CollectionSchema) -> Result<(), StoreError>;

    /// Liveness of the backing storage
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Collection names become table names; keep them to lowercase identifiers.
pub fn validate_collection(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_lowercase());
    if !valid_start || !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return Err(StoreError::InvalidCollection(name.to_string()));
    }
    Ok(())
}

pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Validate a document for insertion, returning its id and object body with
/// creation stamps applied (caller-supplied stamps are kept).
pub fn prepare_insert(doc: Value, now: DateTime<Utc>) -> Result<(String, Map<String, Value>), StoreError> {
    let Value::Object(mut map) = doc else {
        return Err(StoreError::Serialization("document must be a JSON object".to_string()));
    };
    let id = match map.get("_id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => return Err(StoreError::Serialization("document requires a string _id".to_string())),
    };
    let stamp = Value::String(timestamp(now));
    map.entry("createdAt").or_insert_with(|| stamp.clone());
    map.entry("updatedAt").or_insert(stamp);
    Ok((id, map))
}

/// Top-level merge used by `update`
pub fn merge_patch(doc: &mut Map<String, Value>, patch: Map<String, Value>, now: DateTime<Utc>) {
    for (key, value) in patch {
        if key == "_id" || key == "createdAt" {
            continue;
        }
        doc.insert(key, value);
    }
    doc.insert("updatedAt".to_string(), Value::String(timestamp(now)));
}
