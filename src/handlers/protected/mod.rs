// handlers/protected - per-user data, scoped by the X-User-ID header
//
// The header is optional unless `security.require_user_header` is set; without
// it a request addresses documents that have no owner.

pub mod resource;

pub use resource::{all_routes as resource_routes, ResourceKind, RESOURCES};
