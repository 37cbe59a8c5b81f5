use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::models::{find_schema, CollectionSchema};
use super::store::{merge_patch, prepare_insert, validate_collection, DocumentStore, StoreError};
use crate::filter::{field_text, Filter, SortDirection};

#[derive(Debug)]
struct Stored {
    seq: u64,
    doc: Map<String, Value>,
}

#[derive(Debug, Default)]
struct Collection {
    docs: Vec<Stored>,
    unique_fields: Vec<&'static str>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Collection>,
    next_seq: u64,
}

/// In-process document store. Unique indexes declared for known collections
/// are enforced the same way Postgres would enforce them.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Inner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn unique_fields(schema: &CollectionSchema) -> Vec<&'static str> {
        schema
            .indexes
            .iter()
            .filter(|idx| idx.unique && idx.fields.len() == 1)
            .map(|idx| idx.fields[0].0)
            .collect()
    }

    fn select<'a>(collection: &'a Collection, filter: &Filter) -> Vec<&'a Stored> {
        let mut hits: Vec<&Stored> = collection
            .docs
            .iter()
            .filter(|s| filter.matches(&Value::Object(s.doc.clone())))
            .collect();
        // insertion order stands in for the server-side created_at column
        hits.sort_by_key(|s| s.seq);
        if filter.data().order == SortDirection::Desc {
            hits.reverse();
        }
        let offset = filter.data().offset.unwrap_or(0).max(0) as usize;
        let limit = filter.data().limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        hits.into_iter().skip(offset).take(limit).collect()
    }

    fn position(collection: &Collection, id: &str, scope: &Filter) -> Option<usize> {
        collection.docs.iter().position(|s| {
            s.doc.get("_id").and_then(Value::as_str) == Some(id)
                && scope.matches(&Value::Object(s.doc.clone()))
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, doc: Value) -> Result<Value, StoreError> {
        validate_collection(collection)?;
        let now = Utc::now();
        let (id, map) = prepare_insert(doc, now)?;

        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let entry = inner.collections.entry(collection.to_string()).or_insert_with(|| Collection {
            docs: Vec::new(),
            unique_fields: find_schema(collection).map(|s| Self::unique_fields(&s)).unwrap_or_default(),
        });

        if entry.docs.iter().any(|s| s.doc.get("_id").and_then(Value::as_str) == Some(id.as_str())) {
            return Err(StoreError::Conflict(format!("{}_pkey", collection)));
        }
        for field in &entry.unique_fields {
            let wanted = field_text(&Value::Object(map.clone()), field);
            if wanted.is_some()
                && entry.docs.iter().any(|s| field_text(&Value::Object(s.doc.clone()), field) == wanted)
            {
                return Err(StoreError::Conflict(format!("{}_{}_key", collection, field)));
            }
        }

        entry.docs.push(Stored { seq, doc: map.clone() });
        Ok(Value::Object(map))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        validate_collection(collection)?;
        let inner = self.inner.read().await;
        Ok(inner
            .collections
            .get(collection)
            .map(|c| Self::select(c, filter).into_iter().map(|s| Value::Object(s.doc.clone())).collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str, scope: &Filter) -> Result<Option<Value>, StoreError> {
        validate_collection(collection)?;
        let inner = self.inner.read().await;
        Ok(inner.collections.get(collection).and_then(|c| {
            Self::position(c, id, scope).map(|i| Value::Object(c.docs[i].doc.clone()))
        }))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        scope: &Filter,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        validate_collection(collection)?;
        let mut inner = self.inner.write().await;
        let Some(c) = inner.collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(i) = Self::position(c, id, scope) else {
            return Ok(None);
        };
        merge_patch(&mut c.docs[i].doc, patch, Utc::now());
        Ok(Some(Value::Object(c.docs[i].doc.clone())))
    }

    async fn delete(&self, collection: &str, id: &str, scope: &Filter) -> Result<bool, StoreError> {
        validate_collection(collection)?;
        let mut inner = self.inner.write().await;
        let Some(c) = inner.collections.get_mut(collection) else {
            return Ok(false);
        };
        match Self::position(c, id, scope) {
            Some(i) => {
                c.docs.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        validate_collection(collection)?;
        let inner = self.inner.read().await;
        Ok(inner
            .collections
            .get(collection)
            .map(|c| Self::select(c, filter).len() as u64)
            .unwrap_or(0))
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError> {
        validate_collection(collection)?;
        let mut inner = self.inner.write().await;
        Ok(inner
            .collections
            .get_mut(collection)
            .map(|c| c.docs.drain(..).count() as u64)
            .unwrap_or(0))
    }

    async fn ensure_collection(&self, schema: &CollectionSchema) -> Result<(), StoreError> {
        validate_collection(schema.collection)?;
        let mut inner = self.inner.write().await;
        let entry = inner.collections.entry(schema.collection.to_string()).or_default();
        entry.unique_fields = Self::unique_fields(schema);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn owner(user: &str) -> Filter {
        Filter::scoped("userId", Some(user)).unwrap()
    }

    #[tokio::test]
    async fn find_is_scoped_and_newest_first() {
        let store = MemoryDocumentStore::new();
        store.insert("todos", json!({"_id": "todo_1", "userId": "u1", "todoText": "a"})).await.unwrap();
        store.insert("todos", json!({"_id": "todo_2", "userId": "u1", "todoText": "b"})).await.unwrap();
        store.insert("todos", json!({"_id": "todo_3", "userId": "u2", "todoText": "c"})).await.unwrap();

        let docs = store.find("todos", &owner("u1").newest_first()).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d["_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["todo_2", "todo_1"]);
        assert_eq!(store.count("todos", &owner("u2")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_respects_scope() {
        let store = MemoryDocumentStore::new();
        store.insert("goals", json!({"_id": "goal_1", "userId": "u1"})).await.unwrap();
        assert!(store.get("goals", "goal_1", &owner("u1")).await.unwrap().is_some());
        assert!(store.get("goals", "goal_1", &owner("u2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryDocumentStore::new();
        store.insert("goals", json!({"_id": "goal_1", "userId": "u1", "progress": 0, "goalTitle": "Run"})).await.unwrap();
        let patch = json!({"progress": 40}).as_object().cloned().unwrap();
        let updated = store.update("goals", "goal_1", &owner("u1"), patch).await.unwrap().unwrap();
        assert_eq!(updated["progress"], 40);
        assert_eq!(updated["goalTitle"], "Run");
    }

    #[tokio::test]
    async fn duplicate_unique_field_conflicts() {
        let store = MemoryDocumentStore::new();
        store.insert("contacts", json!({"_id": "msg_1", "contactId": "msg_1"})).await.unwrap();
        let err = store.insert("contacts", json!({"_id": "msg_2", "contactId": "msg_1"})).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_all_on_missing_collection_is_zero() {
        let store = MemoryDocumentStore::new();
        assert_eq!(store.delete_all("carts").await.unwrap(), 0);
        store.insert("visions", json!({"_id": "vision_1"})).await.unwrap();
        store.insert("visions", json!({"_id": "vision_2"})).await.unwrap();
        assert_eq!(store.delete_all("visions").await.unwrap(), 2);
        assert_eq!(store.count("visions", &Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn paging_applies_after_ordering() {
        let store = MemoryDocumentStore::new();
        for n in 1..=5 {
            store.insert("signupdatas", json!({"_id": format!("s{n}")})).await.unwrap();
        }
        let page = store.find("signupdatas", &Filter::new().newest_first().limit(2, Some(2)).unwrap()).await.unwrap();
        let ids: Vec<_> = page.iter().map(|d| d["_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["s3", "s2"]);
    }

    #[tokio::test]
    async fn caller_created_at_does_not_reorder() {
        let store = MemoryDocumentStore::new();
        store.insert("todos", json!({"_id": "todo_1", "createdAt": "9999"})).await.unwrap();
        store.insert("todos", json!({"_id": "todo_2"})).await.unwrap();

        let docs = store.find("todos", &Filter::new().newest_first()).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d["_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["todo_2", "todo_1"]);
    }
}
