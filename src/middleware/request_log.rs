use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::info;

use super::identity::USER_HEADER;
use crate::context::AppContext;

/// One line per request with method, path, user and timing
pub async fn request_log_middleware(State(ctx): State<AppContext>, request: Request, next: Next) -> Response {
    if !ctx.config.api.enable_request_logging {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let user = request
        .headers()
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    info!(
        %method,
        %path,
        user = %user,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}
