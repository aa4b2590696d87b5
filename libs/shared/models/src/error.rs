use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// API-facing error. Each variant carries a stable machine-readable code
/// alongside the human message; `Conflict` additionally carries a structured
/// details payload so callers never have to re-derive the offending ids.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not Found: {1}")]
    NotFound(&'static str, String),

    #[error("Bad Request: {1}")]
    BadRequest(&'static str, String),

    #[error("Conflict: {1}")]
    Conflict(&'static str, String, Value),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::NotFound(code, msg) => (StatusCode::NOT_FOUND, code, msg, Value::Null),
            AppError::BadRequest(code, msg) => (StatusCode::BAD_REQUEST, code, msg, Value::Null),
            AppError::Conflict(code, msg, details) => (StatusCode::CONFLICT, code, msg, details),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg, Value::Null)
            }
        };

        tracing::error!("Error: {}: {} ({})", status, message, code);

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if !details.is_null() {
            error["details"] = details;
        }

        let body = Json(json!({ "error": error }));

        (status, body).into_response()
    }
}
