use axum::{
    extract::{Extension, State},
    http::Method,
};
use serde_json::Value;

use super::{ResourceKind, OWNER_FIELD};
use crate::context::AppContext;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody, JsonObject, UserIdentity};

pub const ALLOW: &str = "GET, POST, PUT, DELETE";

/// GET /api/:resource - the caller's documents, newest first
pub async fn list(
    State(ctx): State<AppContext>,
    Extension(kind): Extension<ResourceKind>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Vec<Value>> {
    let filter = kind.scope(&user)?.newest_first();
    let docs = ctx.store.find(kind.collection, &filter).await?;
    let count = docs.len();
    Ok(ApiResponse::success(docs)
        .count(count)
        .message(format!("{} list retrieved", kind.plural)))
}

/// POST /api/:resource - store the body under a fresh id, owned by the caller
pub async fn create(
    State(ctx): State<AppContext>,
    Extension(kind): Extension<ResourceKind>,
    Extension(user): Extension<UserIdentity>,
    JsonObject(body): JsonObject,
) -> ApiResult<Value> {
    let mut doc = serde_json::Map::with_capacity(body.len() + 2);
    doc.insert("_id".to_string(), Value::String(ctx.ids.next_id(kind.prefix)));
    for (key, value) in body {
        if key != "_id" {
            doc.insert(key, value);
        }
    }
    doc.insert(
        OWNER_FIELD.to_string(),
        user.as_deref().map(|u| Value::String(u.to_string())).unwrap_or(Value::Null),
    );

    let stored = ctx.store.insert(kind.collection, Value::Object(doc)).await?;
    tracing::debug!("Created {} {}", kind.singular, stored["_id"]);
    Ok(ApiResponse::created(stored).message(format!("{} created successfully", kind.singular)))
}

/// PUT /api/:resource - acknowledges and echoes the body; nothing is looked up
pub async fn replace(Extension(kind): Extension<ResourceKind>, JsonBody(body): JsonBody) -> ApiResult<Value> {
    Ok(ApiResponse::success(body).message(format!("{} updated successfully", kind.singular)))
}

/// DELETE /api/:resource - acknowledgement only
pub async fn clear(Extension(kind): Extension<ResourceKind>) -> ApiResult<()> {
    Ok(ApiResponse::acknowledged(format!("{} deleted successfully", kind.singular)))
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(method.as_str(), ALLOW)
}
