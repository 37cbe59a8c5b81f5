use axum::{
    extract::{Extension, Path, State},
    http::Method,
};
use serde_json::Value;

use super::{ResourceKind, OWNER_FIELD};
use crate::context::AppContext;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonObject, UserIdentity};

pub const ALLOW: &str = "GET, PUT, DELETE";

fn not_found(kind: &ResourceKind) -> ApiError {
    ApiError::not_found(format!("{} not found", kind.singular))
}

/// GET /api/:resource/:id
pub async fn get_one(
    State(ctx): State<AppContext>,
    Extension(kind): Extension<ResourceKind>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let scope = kind.scope(&user)?;
    match ctx.store.get(kind.collection, &id, &scope).await? {
        Some(doc) => Ok(ApiResponse::success(doc)),
        None => Err(not_found(&kind)),
    }
}

/// PUT /api/:resource/:id - merge the body into the caller's document
pub async fn update_one(
    State(ctx): State<AppContext>,
    Extension(kind): Extension<ResourceKind>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<String>,
    JsonObject(mut patch): JsonObject,
) -> ApiResult<Value> {
    // Ownership is fixed at creation
    patch.remove(OWNER_FIELD);
    let scope = kind.scope(&user)?;
    match ctx.store.update(kind.collection, &id, &scope, patch).await? {
        Some(doc) => Ok(ApiResponse::success(doc).message(format!("{} updated successfully", kind.singular))),
        None => Err(not_found(&kind)),
    }
}

/// DELETE /api/:resource/:id
pub async fn delete_one(
    State(ctx): State<AppContext>,
    Extension(kind): Extension<ResourceKind>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let scope = kind.scope(&user)?;
    if ctx.store.delete(kind.collection, &id, &scope).await? {
        Ok(ApiResponse::acknowledged(format!("{} deleted", kind.singular)))
    } else {
        Err(not_found(&kind))
    }
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(method.as_str(), ALLOW)
}
