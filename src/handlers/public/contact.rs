use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::database::models::{Contact, ContactSubmission, DocumentModel};
use crate::database::store::timestamp;
use crate::error::ApiError;
use crate::filter::Filter;
use crate::middleware::JsonObject;

pub const PATH: &str = "/api/contact/messages";
pub const ALLOW: &str = "GET, POST";
pub const ID_PREFIX: &str = "msg";

/// POST /api/contact/messages - validate and store a contact-form submission
pub async fn submit(State(ctx): State<AppContext>, JsonObject(body): JsonObject) -> Result<Json<Value>, ApiError> {
    let submission: ContactSubmission = serde_json::from_value(Value::Object(body))
        .map_err(|e| ApiError::bad_request(format!("Invalid contact submission: {}", e)))?;

    let message_id = ctx.ids.next_id(ID_PREFIX);
    let contact = Contact::from_submission(message_id.clone(), submission);
    contact.validate()?;

    ctx.store.insert(Contact::COLLECTION, contact.to_document()?).await?;
    tracing::info!("Contact message {} received from {}", message_id, contact.email);

    Ok(Json(json!({
        "ok": true,
        "message": "Contact message received successfully.",
        "messageId": message_id,
        "timestamp": timestamp(Utc::now()),
    })))
}

/// GET /api/contact/messages - every stored message, newest first
pub async fn list(State(ctx): State<AppContext>) -> Result<Json<Value>, ApiError> {
    let messages = ctx.store.find(Contact::COLLECTION, &Filter::new().newest_first()).await?;
    let message = format!("{} contact messages retrieved", messages.len());
    Ok(Json(json!({ "ok": true, "messages": messages, "message": message })))
}

pub async fn method_not_allowed(method: Method) -> Response {
    let mut response = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "ok": false,
            "message": format!("Method {} not allowed on {}", method, PATH),
        })),
    )
        .into_response();
    response.headers_mut().insert(header::ALLOW, HeaderValue::from_static(ALLOW));
    response
}
