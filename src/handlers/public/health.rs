use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::database::store::timestamp;

pub const API_VERSION: &str = "2.0";

/// GET /api/health - liveness only. `dbConnected` is always true; the
/// readiness probe is the one that touches the store.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Backend API is running",
        "timestamp": timestamp(Utc::now()),
        "dbConnected": true,
        "version": API_VERSION,
    }))
}

/// GET /api/health/ready
pub async fn ready(State(ctx): State<AppContext>) -> Response {
    match ctx.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready", "database": "ok" }))).into_response(),
        Err(e) => {
            tracing::warn!("Readiness probe failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "databaseError": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// ANY /api/test
pub async fn test_endpoint(method: Method, uri: Uri) -> Json<Value> {
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or_else(|| uri.path());
    Json(json!({
        "status": "OK",
        "message": "Minimal test endpoint working",
        "timestamp": timestamp(Utc::now()),
        "method": method.as_str(),
        "path": path,
    }))
}
