// handlers/protected/resource - the per-user resource family
//
// Every family shares one handler set, parameterized by `ResourceKind`:
//   /api/<path>      GET list, POST create, PUT echo, DELETE ack, OPTIONS {ok:true}
//   /api/<path>/:id  GET, PUT merge, DELETE, OPTIONS {ok:true}

pub mod collection;
pub mod item;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, MethodRouter},
    Extension, Router,
};

use crate::context::AppContext;
use crate::filter::{Filter, FilterError};
use crate::middleware::{identify_user_middleware, preflight, UserIdentity};

pub const OWNER_FIELD: &str = "userId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Path segment under `/api`
    pub path: &'static str,
    pub collection: &'static str,
    /// Id prefix, `<prefix>_<digits>`
    pub prefix: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
}

pub const RESOURCES: [ResourceKind; 9] = [
    ResourceKind { path: "visions", collection: "visions", prefix: "vision", singular: "Vision", plural: "Visions" },
    ResourceKind { path: "goals", collection: "goals", prefix: "goal", singular: "Goal", plural: "Goals" },
    ResourceKind { path: "tasks", collection: "tasks", prefix: "task", singular: "Task", plural: "Tasks" },
    ResourceKind { path: "todos", collection: "todos", prefix: "todo", singular: "Todo", plural: "Todos" },
    ResourceKind { path: "milestones", collection: "milestones", prefix: "milestone", singular: "Milestone", plural: "Milestones" },
    ResourceKind { path: "reminders", collection: "reminders", prefix: "reminder", singular: "Reminder", plural: "Reminders" },
    ResourceKind { path: "dailyplans", collection: "dailyplans", prefix: "dailyplan", singular: "Daily plan", plural: "Daily plans" },
    ResourceKind { path: "mywords", collection: "mywords", prefix: "myword", singular: "Word", plural: "Words" },
    ResourceKind { path: "health-data", collection: "healthtrackers", prefix: "health", singular: "Health record", plural: "Health records" },
];

impl ResourceKind {
    pub fn find(path: &str) -> Option<Self> {
        RESOURCES.iter().copied().find(|kind| kind.path == path)
    }

    pub fn mount_path(&self) -> String {
        format!("/api/{}", self.path)
    }

    pub fn scope(&self, user: &UserIdentity) -> Result<Filter, FilterError> {
        Filter::scoped(OWNER_FIELD, user.as_deref())
    }
}

fn collection_route() -> MethodRouter<AppContext> {
    get(collection::list)
        .post(collection::create)
        .put(collection::replace)
        .delete(collection::clear)
        .options(preflight)
        .head(collection::method_not_allowed)
        .fallback(collection::method_not_allowed)
}

fn item_route() -> MethodRouter<AppContext> {
    get(item::get_one)
        .put(item::update_one)
        .delete(item::delete_one)
        .options(preflight)
        .head(item::method_not_allowed)
        .fallback(item::method_not_allowed)
}

/// Routes for one family, nested at its mount path by the caller
pub fn routes(kind: ResourceKind, ctx: &AppContext) -> Router<AppContext> {
    Router::new()
        .route("/", collection_route())
        .route("/:id", item_route())
        .route_layer(from_fn_with_state(ctx.clone(), identify_user_middleware))
        .layer(Extension(kind))
}

/// Every family, each at `/api/<path>`
pub fn all_routes(ctx: &AppContext) -> Router<AppContext> {
    RESOURCES
        .iter()
        .fold(Router::new(), |router, kind| router.nest(&kind.mount_path(), routes(*kind, ctx)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_data_maps_to_tracker_collection() {
        let kind = ResourceKind::find("health-data").unwrap();
        assert_eq!(kind.collection, "healthtrackers");
        assert_eq!(kind.prefix, "health");
        assert!(ResourceKind::find("carts").is_none());
    }

    #[test]
    fn resource_collections_are_known_schemas() {
        for kind in RESOURCES {
            assert!(
                crate::database::models::find_schema(kind.collection).is_some(),
                "{} has no schema",
                kind.collection
            );
        }
    }
}
