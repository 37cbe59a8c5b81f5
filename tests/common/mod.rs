#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::task::JoinHandle;

use life_planner_api::config::AppConfig;
use life_planner_api::database::models::CollectionSchema;
use life_planner_api::database::{DatabaseError, DatabaseManager, DocumentStore, MemoryDocumentStore, StoreError};
use life_planner_api::filter::Filter;
use life_planner_api::{router, AppContext};

/// An in-process server on its own port, torn down when dropped
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub ctx: AppContext,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Server over a fresh in-memory store with development defaults
pub async fn spawn_app() -> Result<TestServer> {
    spawn_with_config(AppConfig::in_memory()).await
}

pub async fn spawn_with_config(config: AppConfig) -> Result<TestServer> {
    spawn_with_store(config, Arc::new(MemoryDocumentStore::new())).await
}

pub async fn spawn_with_store(config: AppConfig, store: Arc<dyn DocumentStore>) -> Result<TestServer> {
    let database = Arc::new(DatabaseManager::new(config.database.clone()));
    let ctx = AppContext::with_store(config, database, store);
    let app = router(ctx.clone());

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        ctx,
        handle,
    })
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// How the wipe double misbehaves
#[derive(Clone, Copy)]
pub enum Fault {
    /// `delete_all` on the named collection returns an error
    FailOn(&'static str),
    /// `delete_all` on the named collection panics
    PanicOn(&'static str),
    /// every operation fails as if the database were down
    Unreachable,
}

/// Memory store with an injected fault
pub struct FaultyStore {
    inner: MemoryDocumentStore,
    fault: Fault,
}

impl FaultyStore {
    pub fn new(fault: Fault) -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            fault,
        }
    }

    fn down(&self) -> Result<(), StoreError> {
        match self.fault {
            Fault::Unreachable => Err(StoreError::Database(DatabaseError::ConnectionError(
                "connection refused".to_string(),
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    async fn insert(&self, collection: &str, doc: Value) -> Result<Value, StoreError> {
        self.down()?;
        self.inner.insert(collection, doc).await
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        self.down()?;
        self.inner.find(collection, filter).await
    }

    async fn get(&self, collection: &str, id: &str, scope: &Filter) -> Result<Option<Value>, StoreError> {
        self.down()?;
        self.inner.get(collection, id, scope).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        scope: &Filter,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        self.down()?;
        self.inner.update(collection, id, scope, patch).await
    }

    async fn delete(&self, collection: &str, id: &str, scope: &Filter) -> Result<bool, StoreError> {
        self.down()?;
        self.inner.delete(collection, id, scope).await
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        self.down()?;
        self.inner.count(collection, filter).await
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError> {
        match self.fault {
            Fault::FailOn(name) if name == collection => {
                Err(StoreError::Serialization(format!("{} is locked", collection)))
            }
            Fault::PanicOn(name) if name == collection => panic!("store crashed while clearing {}", collection),
            _ => {
                self.down()?;
                self.inner.delete_all(collection).await
            }
        }
    }

    async fn ensure_collection(&self, schema: &CollectionSchema) -> Result<(), StoreError> {
        self.down()?;
        self.inner.ensure_collection(schema).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.down()
    }
}
