use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::any,
    Router,
};
use serde_json::json;

use crate::context::AppContext;

const HOP_BY_HOP: [&str; 10] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

/// Routes for the mount prefix itself and everything below it
pub fn routes(prefix: &str) -> Router<AppContext> {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        tracing::warn!("Proxy mount prefix is empty, proxy routes disabled");
        return Router::new();
    }
    Router::new()
        .route(prefix, any(forward))
        .route(&format!("{}/*rest", prefix), any(forward))
}

/// Upstream URL: the backend origin plus whatever followed the prefix, query included
pub fn target_url(backend: &str, prefix: &str, uri: &Uri) -> String {
    let path = uri.path();
    let rest = path.strip_prefix(prefix.trim_end_matches('/')).unwrap_or(path);
    match uri.query() {
        Some(query) => format!("{}{}?{}", backend.trim_end_matches('/'), rest, query),
        None => format!("{}{}", backend.trim_end_matches('/'), rest),
    }
}

/// Caller headers minus hop-by-hop ones, with a JSON content type when none was sent
pub fn forwarded_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut headers: HeaderMap = incoming
        .iter()
        .filter(|(name, _)| !HOP_BY_HOP.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    headers
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));
    headers
}

fn proxy_error(message: impl Into<String>) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message.into() }))).into_response()
}

/// ANY <prefix>/* - relay to the configured backend
pub async fn forward(
    State(ctx): State<AppContext>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let proxy = &ctx.config.proxy;
    let Some(backend) = proxy.backend_url.as_deref().filter(|url| !url.trim().is_empty()) else {
        tracing::error!("Proxy request {} {} with no backend configured", method, uri.path());
        return proxy_error("Backend URL not configured");
    };

    let url = target_url(backend, &proxy.mount_prefix, &uri);
    tracing::info!("Proxying {} {} to {}", method, uri.path(), url);

    let upstream = ctx
        .http
        .request(method, &url)
        .headers(forwarded_headers(&headers))
        .body(body)
        .send()
        .await;

    let response = match upstream {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Proxy error for {}: {}", url, e);
            return proxy_error(e.to_string());
        }
    };

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    match response.bytes().await {
        Ok(bytes) => (
            status,
            [
                (header::CONTENT_TYPE, content_type),
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Proxy body read failed for {}: {}", url, e);
            proxy_error(e.to_string())
        }
    }
}
