use axum::{
    extract::{Extension, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::middleware::AdminIdentity;
use crate::services::clear_all_data;

/// DELETE /api/admin/clear-all-data
///
/// Per-collection failures are reported inside a 200 body. The wipe runs as its
/// own task so that a failure outside those steps still answers with a 500.
pub async fn delete(
    State(ctx): State<AppContext>,
    Extension(AdminIdentity(admin)): Extension<AdminIdentity>,
) -> Response {
    tracing::warn!("Data wipe requested by admin {}", admin);
    let store = ctx.store.clone();
    match tokio::spawn(async move { clear_all_data(store.as_ref()).await }).await {
        Ok(report) => Json(report.to_json()).into_response(),
        Err(e) => {
            tracing::error!("Data wipe aborted: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(method.as_str(), "DELETE")
}
