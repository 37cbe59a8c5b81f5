use axum::{
    extract::{Extension, State},
    http::{Method, StatusCode},
};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::middleware::{AdminIdentity, ApiResponse, ApiResult};
use crate::services::{overview, AdminOverview};

pub const ALLOW: &str = "GET, POST, PUT, DELETE";

/// GET /api/admin - headline counters
pub async fn get(State(ctx): State<AppContext>) -> ApiResult<AdminOverview> {
    let data = overview(ctx.store.as_ref()).await?;
    Ok(ApiResponse::success(data).message("Admin dashboard data retrieved"))
}

/// POST /api/admin
pub async fn post(Extension(AdminIdentity(admin)): Extension<AdminIdentity>) -> ApiResult<()> {
    tracing::info!("Admin action by {}", admin);
    Ok(ApiResponse::acknowledged_with_status(
        "Admin action completed successfully",
        StatusCode::CREATED,
    ))
}

/// PUT /api/admin
pub async fn put(Extension(AdminIdentity(admin)): Extension<AdminIdentity>) -> ApiResult<()> {
    tracing::info!("Admin settings update by {}", admin);
    Ok(ApiResponse::acknowledged("Admin settings updated"))
}

/// DELETE /api/admin
pub async fn delete(Extension(AdminIdentity(admin)): Extension<AdminIdentity>) -> ApiResult<()> {
    tracing::info!("Admin action deletion by {}", admin);
    Ok(ApiResponse::acknowledged("Admin action deleted"))
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(method.as_str(), ALLOW)
}
