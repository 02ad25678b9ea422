use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::pear::ExecutionError;
use crate::trades::{MintError, TradeError};

/// Failure body shared by every route: `{ "success": false, "error": ..., "details"?: ... }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "error": self.error,
        });
        if let Some(details) = self.details {
            body["details"] = json!(details);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<TradeError> for ApiError {
    fn from(err: TradeError) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };
        ApiError::new(status, err.to_string())
    }
}

impl From<MintError> for ApiError {
    fn from(err: MintError) -> Self {
        match err {
            MintError::MissingCharacterId | MintError::MissingWallet => {
                ApiError::bad_request(err.to_string())
            }
            MintError::UnknownCharacter { .. } => ApiError::new(StatusCode::NOT_FOUND, err.to_string()),
            MintError::Execution {
                message, details, ..
            } => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message).with_details(details),
        }
    }
}

impl From<ExecutionError> for ApiError {
    fn from(err: ExecutionError) -> Self {
        if err.is_validation() {
            return ApiError::bad_request(err.to_string());
        }
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, sanitize_error(&err.to_string()))
    }
}

/// Hide error text that may echo credentials back to the caller.
pub fn sanitize_error(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("api key") || lower.contains("secret") || lower.contains("token") {
        "Authentication or configuration error".to_string()
    } else {
        message.to_string()
    }
}
