use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::context::AppContext;
use crate::error::ApiError;

pub const USER_HEADER: &str = "x-user-id";
pub const ADMIN_HEADER: &str = "x-admin-id";

/// Owner of the documents a request touches. `None` addresses unowned documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserIdentity(pub Option<String>);

impl UserIdentity {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Admin named by `X-Admin-ID`. Presence is the only check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminIdentity(pub String);

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Reads `X-User-ID` into a `UserIdentity` extension. When the configuration
/// requires the header, requests without one are rejected (OPTIONS excepted).
pub async fn identify_user_middleware(
    State(ctx): State<AppContext>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = header_text(request.headers(), USER_HEADER);
    if user.is_none() && ctx.config.security.require_user_header && request.method() != Method::OPTIONS {
        tracing::warn!("Rejected {} {} without user header", request.method(), request.uri().path());
        return ApiError::unauthorized("Unauthorized: User ID required").into_response();
    }
    request.extensions_mut().insert(UserIdentity(user));
    next.run(request).await
}

/// Admin gate: every method except OPTIONS needs `X-Admin-ID`
pub async fn require_admin_middleware(mut request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }
    match header_text(request.headers(), ADMIN_HEADER) {
        Some(admin) => {
            request.extensions_mut().insert(AdminIdentity(admin));
            next.run(request).await
        }
        None => ApiError::unauthorized("Unauthorized: Admin ID required").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn blank_header_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_HEADER, HeaderValue::from_static("   "));
        assert_eq!(header_text(&headers, USER_HEADER), None);
        headers.insert(USER_HEADER, HeaderValue::from_static("u1"));
        assert_eq!(header_text(&headers, USER_HEADER).as_deref(), Some("u1"));
    }
}
