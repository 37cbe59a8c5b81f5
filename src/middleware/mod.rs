pub mod body;
pub mod cors;
pub mod identity;
pub mod request_log;
pub mod response;

pub use body::{JsonBody, JsonObject};
pub use cors::cors_headers_middleware;
pub use identity::{identify_user_middleware, require_admin_middleware, AdminIdentity, UserIdentity};
pub use request_log::request_log_middleware;
pub use response::{preflight, ApiResponse, ApiResult};
