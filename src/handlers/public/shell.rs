use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::context::AppContext;

/// Router fallback: serves the single-page shell for browser navigation,
/// otherwise answers with the JSON 404.
pub async fn fallback(State(ctx): State<AppContext>, method: Method, uri: Uri) -> Response {
    let path = uri.path();

    if method == Method::GET && !path.starts_with("/api") {
        if let Some(shell) = ctx.config.static_shell.as_ref() {
            match tokio::fs::read_to_string(shell).await {
                Ok(html) => return ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response(),
                Err(e) => tracing::error!("Static shell {} unreadable: {}", shell.display(), e),
            }
        }
    }

    tracing::warn!("404: {} {}", method, path);
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": path,
            "method": method.as_str(),
            "message": "The requested endpoint does not exist. Check the API documentation.",
        })),
    )
        .into_response()
}
