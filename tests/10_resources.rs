mod common;

use std::collections::HashSet;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use life_planner_api::config::AppConfig;
use life_planner_api::handlers::protected::RESOURCES;

fn is_generated_id(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .map(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

#[tokio::test]
async fn options_answers_ok_for_every_family() -> Result<()> {
    let server = common::spawn_app().await?;
    let client = common::client();

    for kind in RESOURCES {
        let res = client
            .request(Method::OPTIONS, server.url(&kind.mount_path()))
            .header("Origin", "https://planner.example")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK, "{}", kind.path);
        assert_eq!(res.json::<Value>().await?, json!({ "ok": true }), "{}", kind.path);
    }
    Ok(())
}

#[tokio::test]
async fn unsupported_method_is_405_with_allow() -> Result<()> {
    let server = common::spawn_app().await?;
    let client = common::client();

    for kind in RESOURCES {
        let res = client.patch(server.url(&kind.mount_path())).send().await?;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", kind.path);
        assert_eq!(res.headers()["allow"], "GET, POST, PUT, DELETE");
        let body = res.json::<Value>().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Method PATCH not allowed");
    }

    let res = client.patch(server.url("/api/todos/todo_1")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "GET, PUT, DELETE");

    let res = client.head(server.url("/api/todos")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "GET, POST, PUT, DELETE");

    let res = client.head(server.url("/api/todos/todo_1")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "GET, PUT, DELETE");
    Ok(())
}

#[tokio::test]
async fn responses_carry_cors_headers() -> Result<()> {
    let server = common::spawn_app().await?;
    let res = common::client().get(server.url("/api/goals")).send().await?;
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["access-control-allow-methods"], "GET, POST, PUT, DELETE, OPTIONS");
    assert!(res.headers()["access-control-allow-headers"]
        .to_str()?
        .contains("X-Admin-ID"));
    Ok(())
}

#[tokio::test]
async fn post_todo_echoes_body_under_generated_id() -> Result<()> {
    let server = common::spawn_app().await?;
    let res = common::client()
        .post(server.url("/api/todos"))
        .header("X-User-ID", "user_1")
        .json(&json!({ "todoText": "buy milk" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Todo created successfully");
    assert_eq!(body["data"]["todoText"], "buy milk");
    assert_eq!(body["data"]["userId"], "user_1");
    assert!(body["data"]["createdAt"].is_string());
    let id = body["data"]["_id"].as_str().unwrap_or_default();
    assert!(is_generated_id(id, "todo"), "unexpected id {}", id);
    Ok(())
}

#[tokio::test]
async fn empty_post_body_is_an_empty_document() -> Result<()> {
    let server = common::spawn_app().await?;
    let res = common::client().post(server.url("/api/visions")).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert!(is_generated_id(body["data"]["_id"].as_str().unwrap_or_default(), "vision"));
    assert_eq!(body["data"]["userId"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_rejected() -> Result<()> {
    let server = common::spawn_app().await?;
    let client = common::client();

    let res = client
        .post(server.url("/api/goals"))
        .header("Content-Type", "application/json")
        .body("{\"goalTitle\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");

    let res = client.post(server.url("/api/goals")).json(&json!([1, 2])).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn rapid_posts_get_distinct_ids() -> Result<()> {
    // Distinct within one process; ids from separate processes may still collide.
    let server = common::spawn_app().await?;
    let client = common::client();
    let mut seen = HashSet::new();

    for i in 0..25 {
        let body = client
            .post(server.url("/api/tasks"))
            .json(&json!({ "title": format!("task {}", i) }))
            .send()
            .await?
            .json::<Value>()
            .await?;
        let id = body["data"]["_id"].as_str().unwrap_or_default().to_string();
        assert!(is_generated_id(&id, "task"), "unexpected id {}", id);
        assert!(seen.insert(id), "duplicate id on request {}", i);
    }
    Ok(())
}

#[tokio::test]
async fn list_is_scoped_to_the_user_and_newest_first() -> Result<()> {
    let server = common::spawn_app().await?;
    let client = common::client();

    for (text, created) in [("first", "9999-12-31T00:00:00.000Z"), ("second", "1970-01-01T00:00:00.000Z")] {
        client
            .post(server.url("/api/mywords"))
            .header("X-User-ID", "alice")
            .json(&json!({ "wordText": text, "createdAt": created }))
            .send()
            .await?;
    }
    client
        .post(server.url("/api/mywords"))
        .header("X-User-ID", "bob")
        .json(&json!({ "wordText": "bob's" }))
        .send()
        .await?;

    let body = client
        .get(server.url("/api/mywords"))
        .header("X-User-ID", "alice")
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["count"], 2);
    assert_eq!(body["message"], "Words list retrieved");
    assert_eq!(body["data"][0]["wordText"], "second");
    assert_eq!(body["data"][1]["wordText"], "first");

    let anonymous = client.get(server.url("/api/mywords")).send().await?.json::<Value>().await?;
    assert_eq!(anonymous["count"], 0);
    assert_eq!(anonymous["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn collection_put_and_delete_acknowledge_without_lookup() -> Result<()> {
    let server = common::spawn_app().await?;
    let client = common::client();

    let res = client
        .put(server.url("/api/health-data"))
        .json(&json!({ "mood": "calm" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], json!({ "mood": "calm" }));
    assert_eq!(body["message"], "Health record updated successfully");

    let body = client.delete(server.url("/api/dailyplans")).send().await?.json::<Value>().await?;
    assert_eq!(body, json!({ "success": true, "message": "Daily plan deleted successfully" }));
    Ok(())
}

#[tokio::test]
async fn item_routes_read_merge_and_delete() -> Result<()> {
    let server = common::spawn_app().await?;
    let client = common::client();

    let created = client
        .post(server.url("/api/goals"))
        .header("X-User-ID", "alice")
        .json(&json!({ "goalTitle": "Run a marathon", "progress": 10 }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let id = created["data"]["_id"].as_str().unwrap_or_default().to_string();
    let item = server.url(&format!("/api/goals/{}", id));

    let res = client.get(&item).header("X-User-ID", "bob").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Goal not found");

    let updated = client
        .put(&item)
        .header("X-User-ID", "alice")
        .json(&json!({ "progress": 40, "_id": "hijack", "userId": "bob" }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(updated["message"], "Goal updated successfully");
    assert_eq!(updated["data"]["_id"], id.as_str());
    assert_eq!(updated["data"]["userId"], "alice");
    assert_eq!(updated["data"]["progress"], 40);
    assert_eq!(updated["data"]["goalTitle"], "Run a marathon");

    let fetched = client.get(&item).header("X-User-ID", "alice").send().await?.json::<Value>().await?;
    assert_eq!(fetched["data"]["progress"], 40);

    let res = client.delete(&item).header("X-User-ID", "alice").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Goal deleted");

    let res = client.delete(&item).header("X-User-ID", "alice").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn user_header_can_be_required() -> Result<()> {
    let mut config = AppConfig::in_memory();
    config.security.require_user_header = true;
    let server = common::spawn_with_config(config).await?;
    let client = common::client();

    let res = client.get(server.url("/api/todos")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["message"], "Unauthorized: User ID required");

    let res = client.request(Method::OPTIONS, server.url("/api/todos")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(server.url("/api/todos")).header("X-User-ID", "u1").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
