use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::context::AppContext;

pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, X-User-ID, X-Admin-ID, Authorization, X-Requested-With";

/// Stamps permissive CORS headers on every response. Preflight requests are
/// not short-circuited; they reach the route's own OPTIONS handler.
pub async fn cors_headers_middleware(State(ctx): State<AppContext>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let origin = HeaderValue::from_str(&ctx.config.security.allow_origin)
        .unwrap_or_else(|_| HeaderValue::from_static("*"));
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    response
}
