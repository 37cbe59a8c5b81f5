use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::database::store::timestamp;
use crate::database::{DocumentStore, StoreError};

/// Collections cleared by the administrative wipe, in order. `admins` is never cleared.
pub const WIPE_COLLECTIONS: [&str; 17] = [
    "users",
    "visions",
    "goals",
    "tasks",
    "todos",
    "mywords",
    "healthtrackers",
    "workshops",
    "contacts",
    "carts",
    "checkouts",
    "transactions",
    "signupdatas",
    "signindatas",
    "milestones",
    "reminders",
    "dailyplans",
];

#[derive(Debug)]
pub struct CollectionOutcome {
    pub collection: &'static str,
    pub result: Result<u64, StoreError>,
}

#[derive(Debug)]
pub struct WipeReport {
    pub outcomes: Vec<CollectionOutcome>,
    pub finished_at: DateTime<Utc>,
}

impl WipeReport {
    /// Every collection with its deleted count; failed steps read 0
    pub fn deleted_collections(&self) -> Map<String, Value> {
        self.outcomes
            .iter()
            .map(|o| (o.collection.to_string(), json!(o.result.as_ref().copied().unwrap_or(0))))
            .collect()
    }

    pub fn failed_collections(&self) -> Map<String, Value> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.result {
                Err(e) => Some((o.collection.to_string(), Value::String(e.to_string()))),
                Ok(_) => None,
            })
            .collect()
    }

    pub fn total_deleted(&self) -> u64 {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok()).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_err())
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": true,
            "message": "Database cleared successfully",
            "deletedCollections": self.deleted_collections(),
            "totalDeleted": self.total_deleted(),
            "timestamp": timestamp(self.finished_at),
        });
        let failed = self.failed_collections();
        if !failed.is_empty() {
            body["failedCollections"] = Value::Object(failed);
        }
        body
    }
}

/// Clear the fixed collection list
pub async fn clear_all_data(store: &dyn DocumentStore) -> WipeReport {
    clear_collections(store, &WIPE_COLLECTIONS).await
}

/// Clear each collection in turn. One collection failing never stops the rest,
/// and nothing is rolled back.
pub async fn clear_collections(store: &dyn DocumentStore, collections: &[&'static str]) -> WipeReport {
    warn!("Starting data wipe of {} collections", collections.len());
    let mut outcomes = Vec::with_capacity(collections.len());
    for &collection in collections {
        let result = store.delete_all(collection).await;
        match &result {
            Ok(count) => info!("{}: deleted {} documents", collection, count),
            Err(e) => warn!("{}: wipe failed: {}", collection, e),
        }
        outcomes.push(CollectionOutcome { collection, result });
    }
    let report = WipeReport {
        outcomes,
        finished_at: Utc::now(),
    };
    info!("Data wipe finished, {} documents deleted", report.total_deleted());
    report
}
