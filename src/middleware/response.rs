use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Success envelope: `{success:true, data?, count?, message?, ...extra}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub status_code: Option<StatusCode>,
    pub message: Option<String>,
    pub count: Option<usize>,
    pub extra: Map<String, Value>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            status_code: None,
            message: None,
            count: None,
            extra: Map::new(),
        }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            status_code: Some(status_code),
            ..Self::success(data)
        }
    }

    /// Create a 201 Created response
    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Add a top-level field next to `data`
    pub fn field(mut self, key: &str, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.extra.insert(key.to_string(), value);
            }
            Err(e) => tracing::error!("Failed to serialize response field {}: {}", key, e),
        }
        self
    }
}

impl ApiResponse<()> {
    /// Envelope without a `data` member
    pub fn acknowledged(message: impl Into<String>) -> Self {
        Self {
            data: None,
            status_code: None,
            message: Some(message.into()),
            count: None,
            extra: Map::new(),
        }
    }

    pub fn acknowledged_with_status(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            status_code: Some(status_code),
            ..Self::acknowledged(message)
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let mut envelope = json!({ "success": true });
        if let Some(data) = &self.data {
            match serde_json::to_value(data) {
                Ok(value) => envelope["data"] = value,
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "success": false,
                            "error": "Failed to serialize response data"
                        })),
                    )
                        .into_response();
                }
            }
        }
        if let Some(count) = self.count {
            envelope["count"] = json!(count);
        }
        for (key, value) in self.extra {
            envelope[key.as_str()] = value;
        }
        if let Some(message) = self.message {
            envelope["message"] = Value::String(message);
        }

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

/// `{ok:true}`, the answer to every OPTIONS request
pub async fn preflight() -> Json<Value> {
    Json(json!({ "ok": true }))
}
