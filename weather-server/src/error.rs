//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{error}")]
    Internal { error: String, message: Option<String> },
}

impl ApiError {
    pub fn internal(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Internal { error: error.into(), message: Some(message.into()) }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, ErrorResponse { error, message: None })
            }
            Self::NotFound(error) => (StatusCode::NOT_FOUND, ErrorResponse { error, message: None }),
            Self::Internal { error, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse { error, message })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("x".into()).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("x", "y").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn message_is_omitted_when_absent() {
        let body = ErrorResponse { error: "Message not found".into(), message: None };
        let value = serde_json::to_value(body).expect("json");
        assert_eq!(value, serde_json::json!({ "error": "Message not found" }));
    }
}
