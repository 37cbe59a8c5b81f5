// handlers/public/mod.rs - Public handlers (no identity required)
//
// Liveness and readiness probes, the service descriptor, the contact-form
// inbox, the backend proxy function and the static-shell fallback.
//
// Security Level: None
// Route Prefix: /, /api/health*, /api/test, /api/contact/*, proxy mount prefix
// Middleware: none beyond the global CORS and request logging layers

pub mod contact;
pub mod health;
pub mod proxy;
pub mod root;
pub mod shell;

use axum::routing::{any, get};
use axum::Router;

use crate::context::AppContext;
use crate::middleware::preflight;

pub use shell::fallback;

pub fn routes(ctx: &AppContext) -> Router<AppContext> {
    Router::new()
        .route("/", get(root::descriptor))
        .route("/api/health", get(health::health).options(preflight))
        .route("/api/health/ready", get(health::ready).options(preflight))
        .route("/api/test", any(health::test_endpoint))
        .route(
            contact::PATH,
            get(contact::list)
                .post(contact::submit)
                .options(preflight)
                .head(contact::method_not_allowed)
                .fallback(contact::method_not_allowed),
        )
        .merge(proxy::routes(&ctx.config.proxy.mount_prefix))
}
