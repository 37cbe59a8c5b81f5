use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::manager::DatabaseManager;
use super::models::{find_schema, CollectionSchema, IndexDirection};
use super::store::{merge_patch, prepare_insert, quote_identifier, validate_collection, DocumentStore, StoreError};
use crate::filter::filter_where::FilterWhere;
use crate::filter::Filter;

const UNDEFINED_TABLE: &str = "42P01";

/// Postgres-backed store: one table per collection, `(id, doc JSONB, created_at, updated_at)`.
pub struct PgDocumentStore {
    database: Arc<DatabaseManager>,
    provisioned: RwLock<HashSet<String>>,
}

impl PgDocumentStore {
    pub fn new(database: Arc<DatabaseManager>) -> Self {
        Self {
            database,
            provisioned: RwLock::new(HashSet::new()),
        }
    }

    async fn pool(&self) -> Result<PgPool, StoreError> {
        Ok(self.database.connect().await?)
    }

    fn is_undefined_table(err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNDEFINED_TABLE))
    }

    fn map_write_error(err: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                let constraint = db.constraint().unwrap_or("unique index").to_string();
                return StoreError::Conflict(constraint);
            }
        }
        StoreError::from(err)
    }

    pub fn create_table_sql(collection: &str) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\
             id TEXT PRIMARY KEY, \
             doc JSONB NOT NULL, \
             created_at TIMESTAMPTZ NOT NULL DEFAULT now(), \
             updated_at TIMESTAMPTZ NOT NULL DEFAULT now())",
            quote_identifier(collection)
        )
    }

    pub fn create_index_sql(schema: &CollectionSchema) -> Vec<String> {
        schema
            .indexes
            .iter()
            .map(|idx| {
                let columns: Vec<String> = idx
                    .fields
                    .iter()
                    .map(|(field, dir)| {
                        let dir = match dir {
                            IndexDirection::Asc => "ASC",
                            IndexDirection::Desc => "DESC",
                        };
                        format!("(doc->>'{}') {}", field, dir)
                    })
                    .collect();
                format!(
                    "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
                    if idx.unique { "UNIQUE " } else { "" },
                    quote_identifier(&idx.name(schema.collection)),
                    quote_identifier(schema.collection),
                    columns.join(", ")
                )
            })
            .collect()
    }

    /// Collections are created on first write, with indexes when the schema is known
    async fn provision(&self, pool: &PgPool, collection: &str) -> Result<(), StoreError> {
        if self.provisioned.read().await.contains(collection) {
            return Ok(());
        }
        match find_schema(collection) {
            Some(schema) => self.create(pool, &schema).await?,
            None => {
                sqlx::query(&Self::create_table_sql(collection)).execute(pool).await?;
            }
        }
        self.provisioned.write().await.insert(collection.to_string());
        Ok(())
    }

    async fn create(&self, pool: &PgPool, schema: &CollectionSchema) -> Result<(), StoreError> {
        sqlx::query(&Self::create_table_sql(schema.collection)).execute(pool).await?;
        for statement in Self::create_index_sql(schema) {
            debug!("{}", statement);
            sqlx::query(&statement).execute(pool).await?;
        }
        Ok(())
    }

    /// `SELECT <what> FROM <collection> WHERE <scope> AND id = $n`
    fn scoped_by_id<'a>(head: &str, collection: &str, id: &'a str, scope: &'a Filter) -> QueryBuilder<'a, Postgres> {
        let mut builder = QueryBuilder::new(format!("{} {}", head, quote_identifier(collection)));
        let conditions = &scope.data().where_clause;
        FilterWhere::push_where(&mut builder, conditions);
        builder.push(if conditions.is_empty() { " WHERE " } else { " AND " });
        builder.push("id = ");
        builder.push_bind(id);
        builder
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, doc: Value) -> Result<Value, StoreError> {
        validate_collection(collection)?;
        let pool = self.pool().await?;
        self.provision(&pool, collection).await?;

        let now = Utc::now();
        let (id, map) = prepare_insert(doc, now)?;
        let doc = Value::Object(map);
        let sql = format!(
            "INSERT INTO {} (id, doc, created_at, updated_at) VALUES ($1, $2, $3, $3)",
            quote_identifier(collection)
        );
        sqlx::query(&sql)
            .bind(&id)
            .bind(Json(&doc))
            .bind(now)
            .execute(&pool)
            .await
            .map_err(Self::map_write_error)?;
        debug!("Inserted {} into {}", id, collection);
        Ok(doc)
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        validate_collection(collection)?;
        let pool = self.pool().await?;
        let mut builder = QueryBuilder::new(format!("SELECT doc FROM {}", quote_identifier(collection)));
        FilterWhere::push_where(&mut builder, &filter.data().where_clause);
        FilterWhere::push_order_and_paging(&mut builder, filter.data());

        match builder.build_query_scalar::<Json<Value>>().fetch_all(&pool).await {
            Ok(rows) => Ok(rows.into_iter().map(|Json(doc)| doc).collect()),
            Err(e) if Self::is_undefined_table(&e) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, collection: &str, id: &str, scope: &Filter) -> Result<Option<Value>, StoreError> {
        validate_collection(collection)?;
        let pool = self.pool().await?;
        let mut builder = Self::scoped_by_id("SELECT doc FROM", collection, id, scope);
        match builder.build_query_scalar::<Json<Value>>().fetch_optional(&pool).await {
            Ok(row) => Ok(row.map(|Json(doc)| doc)),
            Err(e) if Self::is_undefined_table(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        scope: &Filter,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        validate_collection(collection)?;
        let pool = self.pool().await?;
        let mut tx = pool.begin().await?;

        let mut select = Self::scoped_by_id("SELECT doc FROM", collection, id, scope);
        select.push(" FOR UPDATE");
        let current = match select.build_query_scalar::<Json<Value>>().fetch_optional(&mut *tx).await {
            Ok(Some(Json(Value::Object(map)))) => map,
            Ok(_) => return Ok(None),
            Err(e) if Self::is_undefined_table(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let now = Utc::now();
        let mut doc = current;
        merge_patch(&mut doc, patch, now);
        let doc = Value::Object(doc);
        let sql = format!(
            "UPDATE {} SET doc = $1, updated_at = $2 WHERE id = $3",
            quote_identifier(collection)
        );
        sqlx::query(&sql)
            .bind(Json(&doc))
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Self::map_write_error)?;
        tx.commit().await?;
        Ok(Some(doc))
    }

    async fn delete(&self, collection: &str, id: &str, scope: &Filter) -> Result<bool, StoreError> {
        validate_collection(collection)?;
        let pool = self.pool().await?;
        let mut builder = Self::scoped_by_id("DELETE FROM", collection, id, scope);
        match builder.build().execute(&pool).await {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(e) if Self::is_undefined_table(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        validate_collection(collection)?;
        let pool = self.pool().await?;
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", quote_identifier(collection)));
        FilterWhere::push_where(&mut builder, &filter.data().where_clause);
        match builder.build_query_scalar::<i64>().fetch_one(&pool).await {
            Ok(n) => Ok(n.max(0) as u64),
            Err(e) if Self::is_undefined_table(&e) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError> {
        validate_collection(collection)?;
        let pool = self.pool().await?;
        let sql = format!("DELETE FROM {}", quote_identifier(collection));
        match sqlx::query(&sql).execute(&pool).await {
            Ok(result) => Ok(result.rows_affected()),
            Err(e) if Self::is_undefined_table(&e) => {
                debug!("Collection {} does not exist, nothing to delete", collection);
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn ensure_collection(&self, schema: &CollectionSchema) -> Result<(), StoreError> {
        validate_collection(schema.collection)?;
        let pool = self.pool().await?;
        self.create(&pool, schema).await?;
        self.provisioned.write().await.insert(schema.collection.to_string());
        info!("Ensured collection {} ({} indexes)", schema.collection, schema.indexes.len());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(self.database.health_check().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{DocumentModel, Todo};

    #[test]
    fn table_ddl_quotes_collection() {
        let sql = PgDocumentStore::create_table_sql("todos");
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"todos\" ("));
        assert!(sql.contains("doc JSONB NOT NULL"));
    }

    #[test]
    fn index_ddl_uses_expression_columns() {
        let statements = PgDocumentStore::create_index_sql(&Todo::schema());
        assert_eq!(
            statements[0],
            "CREATE INDEX IF NOT EXISTS \"todos_userId_completed_idx\" ON \"todos\" ((doc->>'userId') ASC, (doc->>'completed') ASC)"
        );
    }

    #[test]
    fn scoped_lookup_binds_owner_then_id() {
        let scope = Filter::scoped("userId", Some("u1")).unwrap();
        let builder = PgDocumentStore::scoped_by_id("SELECT doc FROM", "goals", "goal_1", &scope);
        assert_eq!(builder.sql(), "SELECT doc FROM \"goals\" WHERE doc->>'userId' = $1 AND id = $2");

        let unscoped = Filter::new();
        let builder = PgDocumentStore::scoped_by_id("DELETE FROM", "goals", "goal_1", &unscoped);
        assert_eq!(builder.sql(), "DELETE FROM \"goals\" WHERE id = $1");
    }
}
