use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::database::models::all_schemas;
use crate::database::{DatabaseManager, DocumentStore, MemoryDocumentStore, PgDocumentStore, StoreError};
use crate::ids::IdGenerator;

/// Process-wide state handed to every handler as axum `State`
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub database: Arc<DatabaseManager>,
    pub store: Arc<dyn DocumentStore>,
    pub http: reqwest::Client,
    pub ids: Arc<IdGenerator>,
}

impl AppContext {
    /// Build the context without touching the database; connections open lazily.
    pub fn from_config(config: AppConfig) -> Self {
        let database = Arc::new(DatabaseManager::new(config.database.clone()));
        let store: Arc<dyn DocumentStore> = match config.database.backend {
            StorageBackend::Postgres => Arc::new(PgDocumentStore::new(database.clone())),
            StorageBackend::Memory => Arc::new(MemoryDocumentStore::new()),
        };
        Self::with_store(config, database, store)
    }

    /// Context over an explicit store, used by tests to inject doubles
    pub fn with_store(config: AppConfig, database: Arc<DatabaseManager>, store: Arc<dyn DocumentStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.proxy.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self {
            config: Arc::new(config),
            database,
            store,
            http,
            ids: Arc::new(IdGenerator::new()),
        }
    }

    /// In-memory context with development defaults
    pub fn in_memory() -> Self {
        Self::from_config(AppConfig::in_memory())
    }

    /// Provision every known collection and its indexes
    pub async fn initialize(&self) -> Result<usize, StoreError> {
        let schemas = all_schemas();
        for schema in &schemas {
            self.store.ensure_collection(schema).await?;
        }
        info!("Initialized {} collections", schemas.len());
        Ok(schemas.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_context_initializes_without_database() {
        let ctx = AppContext::in_memory();
        assert!(ctx.initialize().await.unwrap() > 10);
        assert!(!ctx.database.is_connected().await);
    }
}
