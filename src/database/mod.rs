pub mod manager;
pub mod memory_store;
pub mod models;
pub mod pg_store;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory_store::MemoryDocumentStore;
pub use pg_store::PgDocumentStore;
pub use store::{DocumentStore, StoreError};
