use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Any JSON body; an empty body reads as `{}`. Content-Type is not checked.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

/// A JSON object body; an empty body reads as `{}`
#[derive(Debug, Clone)]
pub struct JsonObject(pub Map<String, Value>);

pub fn parse_body(bytes: &[u8]) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| ApiError::invalid_json(format!("Invalid JSON body: {}", e)))
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(IntoResponse::into_response)?;
        parse_body(&bytes).map(JsonBody).map_err(IntoResponse::into_response)
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::from_request(req, state).await?;
        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(ApiError::bad_request("Request body must be a JSON object").into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_is_empty_object() {
        assert_eq!(parse_body(b"").unwrap(), json!({}));
        assert_eq!(parse_body(b"  \n").unwrap(), json!({}));
    }

    #[test]
    fn malformed_body_is_rejected() {
        let err = parse_body(b"{not json").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_JSON");
    }
}
