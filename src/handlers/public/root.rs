use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::handlers::protected::RESOURCES;

/// GET / - service descriptor
pub async fn descriptor(State(ctx): State<AppContext>) -> Json<Value> {
    let resources: Vec<String> = RESOURCES
        .iter()
        .map(|kind| format!("{}[/:id] (X-User-ID)", kind.mount_path()))
        .collect();

    Json(json!({
        "success": true,
        "data": {
            "name": "Life Planner API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Visions, goals, tasks, todos and planner records over a document store",
            "endpoints": {
                "home": "/ (public)",
                "health": "/api/health, /api/health/ready (public)",
                "test": "/api/test (public)",
                "contact": "/api/contact/messages (public)",
                "resources": resources,
                "admin": "/api/admin[/dashboard-stats|/signups|/signins|/contacts|/users|/clear-all-data] (X-Admin-ID)",
                "proxy": format!("{}/* (forwards to the configured backend)", ctx.config.proxy.mount_prefix),
            }
        }
    }))
}
