// handlers/elevated/admin - /api/admin/*
//
//   /api/admin                  GET overview, POST/PUT/DELETE acknowledgements
//   /api/admin/dashboard-stats  GET
//   /api/admin/{signups,signins,contacts,users}  GET paginated listing
//   /api/admin/clear-all-data   DELETE, wipes every application collection

pub mod clear_all_data;
pub mod dashboard;
pub mod listings;
pub mod overview;

use axum::{
    handler::Handler,
    http::Method,
    middleware::from_fn,
    routing::{delete, get, MethodRouter},
    Router,
};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::middleware::{preflight, require_admin_middleware};

async fn get_only(method: Method) -> ApiError {
    ApiError::method_not_allowed(method.as_str(), "GET")
}

/// GET-only admin route; every other verb, HEAD included, gets the JSON 405
fn read_only<H, T>(handler: H) -> MethodRouter<AppContext>
where
    H: Handler<T, AppContext>,
    T: 'static,
{
    get(handler)
        .options(preflight)
        .head(get_only)
        .fallback(get_only)
}

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route(
            "/api/admin",
            get(overview::get)
                .post(overview::post)
                .put(overview::put)
                .delete(overview::delete)
                .options(preflight)
                .head(overview::method_not_allowed)
                .fallback(overview::method_not_allowed),
        )
        .route("/api/admin/dashboard-stats", read_only(dashboard::get))
        .route("/api/admin/signups", read_only(listings::signups))
        .route("/api/admin/signins", read_only(listings::signins))
        .route("/api/admin/contacts", read_only(listings::contacts))
        .route("/api/admin/users", read_only(listings::users))
        .route(
            "/api/admin/clear-all-data",
            delete(clear_all_data::delete)
                .options(preflight)
                .fallback(clear_all_data::method_not_allowed),
        )
        .route_layer(from_fn(require_admin_middleware))
}
