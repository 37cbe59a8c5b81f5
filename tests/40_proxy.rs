mod common;

use anyhow::{Context, Result};
use axum::{
    extract::Request,
    http::{header, StatusCode as AxumStatus},
    response::IntoResponse,
    Router,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

use life_planner_api::config::AppConfig;

const PREFIX: &str = "/.netlify/functions/api";

/// Throwaway backend: echoes what it received, except `/api/missing` which is a 404
async fn spawn_upstream() -> Result<String> {
    async fn echo(request: Request) -> axum::response::Response {
        let path = request.uri().path().to_string();
        let query = request.uri().query().map(str::to_string);
        let method = request.method().to_string();
        let user = request
            .headers()
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(request.into_body(), usize::MAX).await.unwrap_or_default();

        if path == "/api/missing" {
            return (AxumStatus::NOT_FOUND, [(header::CONTENT_TYPE, "text/plain")], "nope").into_response();
        }
        axum::Json(json!({
            "path": path,
            "query": query,
            "method": method,
            "user": user,
            "contentType": content_type,
            "body": String::from_utf8_lossy(&body),
        }))
        .into_response()
    }

    let port = portpicker::pick_unused_port().context("failed to pick upstream port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let app = Router::new().fallback(echo);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

fn proxy_config(backend: Option<String>) -> AppConfig {
    let mut config = AppConfig::in_memory();
    config.proxy.backend_url = backend;
    config
}

#[tokio::test]
async fn forwards_path_query_headers_and_body() -> Result<()> {
    let upstream = spawn_upstream().await?;
    let server = common::spawn_with_config(proxy_config(Some(upstream))).await?;

    let res = common::client()
        .post(server.url(&format!("{}/api/todos?page=2", PREFIX)))
        .header("X-User-ID", "u42")
        .body("{\"todoText\":\"proxied\"}")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert!(res.headers()["content-type"].to_str()?.starts_with("application/json"));

    let echoed = res.json::<Value>().await?;
    assert_eq!(echoed["path"], "/api/todos");
    assert_eq!(echoed["query"], "page=2");
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["user"], "u42");
    assert_eq!(echoed["contentType"], "application/json");
    assert_eq!(echoed["body"], "{\"todoText\":\"proxied\"}");
    Ok(())
}

#[tokio::test]
async fn relays_upstream_errors_verbatim() -> Result<()> {
    let upstream = spawn_upstream().await?;
    let server = common::spawn_with_config(proxy_config(Some(upstream))).await?;

    let res = common::client().get(server.url(&format!("{}/api/missing", PREFIX))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers()["content-type"].to_str()?.starts_with("text/plain"));
    assert_eq!(res.text().await?, "nope");
    Ok(())
}

#[tokio::test]
async fn unconfigured_backend_is_500() -> Result<()> {
    let server = common::spawn_with_config(proxy_config(None)).await?;
    let res = common::client().get(server.url(&format!("{}/api/health", PREFIX))).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Backend URL not configured" }));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_500_with_message() -> Result<()> {
    let port = portpicker::pick_unused_port().context("failed to pick port")?;
    let server = common::spawn_with_config(proxy_config(Some(format!("http://127.0.0.1:{}", port)))).await?;

    let res = common::client().get(server.url(&format!("{}/api/health", PREFIX))).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
    Ok(())
}
