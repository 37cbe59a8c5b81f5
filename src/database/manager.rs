use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the single pooled connection for the process.
///
/// `connect()` is idempotent: the first successful call memoizes the pool and
/// later calls hand out clones of it. A failed attempt memoizes nothing, so the
/// next call tries again. There is no retry or backoff inside one call.
pub struct DatabaseManager {
    config: DatabaseConfig,
    pool: RwLock<Option<PgPool>>,
}

impl DatabaseManager {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: RwLock::new(None),
        }
    }

    /// Get the memoized pool or establish it
    pub async fn connect(&self) -> Result<PgPool, DatabaseError> {
        // Fast path: try read lock
        {
            let pool = self.pool.read().await;
            if let Some(pool) = pool.as_ref() {
                return Ok(pool.clone());
            }
        }

        // Slow path holds the write lock across the attempt, so concurrent
        // first callers wait for one connection instead of racing to open two.
        let mut slot = self.pool.write().await;
        if let Some(pool) = slot.as_ref() {
            return Ok(pool.clone());
        }

        let connection_string = self.validated_url()?;
        let pool = PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .acquire_timeout(Duration::from_secs(self.config.connection_timeout_secs))
            .connect(&connection_string)
            .await
            .map_err(|e| {
                error!("Database connection failed: {}", e);
                DatabaseError::ConnectionError(e.to_string())
            })?;

        *slot = Some(pool.clone());
        info!("Created database pool for: {}", Self::redacted(&connection_string));
        Ok(pool)
    }

    pub async fn is_connected(&self) -> bool {
        self.pool.read().await.is_some()
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        let pool = self.connect().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Close and forget the pool (e.g., on shutdown)
    pub async fn close(&self) {
        let mut slot = self.pool.write().await;
        if let Some(pool) = slot.take() {
            pool.close().await;
            info!("Closed database pool");
        }
    }

    fn validated_url(&self) -> Result<String, DatabaseError> {
        if self.config.url.trim().is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }
        let url = url::Url::parse(&self.config.url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        match url.scheme() {
            "postgres" | "postgresql" => Ok(url.into()),
            _ => Err(DatabaseError::InvalidDatabaseUrl),
        }
    }

    /// Connection string without the password, for logs
    fn redacted(connection_string: &str) -> String {
        match url::Url::parse(connection_string) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.into()
            }
            Err(_) => "<unparseable>".to_string(),
        }
    }
}
