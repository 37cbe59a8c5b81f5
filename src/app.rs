use axum::{extract::DefaultBodyLimit, middleware::from_fn_with_state, Router};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::handlers::{admin_routes, public, resource_routes};
use crate::middleware::{cors_headers_middleware, request_log_middleware};

/// The complete HTTP surface over one application context
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .merge(public::routes(&ctx))
        .merge(resource_routes(&ctx))
        .merge(admin_routes())
        .fallback(public::fallback)
        // Global middleware
        .layer(DefaultBodyLimit::max(ctx.config.api.max_request_size_bytes))
        .layer(from_fn_with_state(ctx.clone(), request_log_middleware))
        .layer(from_fn_with_state(ctx.clone(), cors_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
