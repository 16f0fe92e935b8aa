//! API error types with uniform JSON envelope.
//!
//! Failures carry a single `error` string. Internal failures log their
//! detail through tracing and surface only a static, resource-specific
//! message (no stack trace, no detail leakage).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt::Display;

use crate::db::DatabaseError;

/// Error envelope body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{public}")]
    Internal { public: &'static str, detail: String },
}

impl ApiError {
    /// Wrap an internal failure: `public` is the message the client sees,
    /// the underlying error only reaches the log.
    pub fn internal(public: &'static str, err: impl Display) -> Self {
        ApiError::Internal {
            public,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal { public, detail } => {
                tracing::error!(%detail, "API internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::internal("Internal server error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn bad_request_returns_400() {
        let response = ApiError::BadRequest("Aadhaar number must be 12 digits".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Aadhaar number must be 12 digits");
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("Patient not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Patient not found");
    }

    #[tokio::test]
    async fn internal_returns_500_with_static_message() {
        let response =
            ApiError::internal("Login failed", "disk exploded at /var/db").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        // Internal errors hide details from the client
        assert_eq!(json["error"], "Login failed");
        assert!(!String::from_utf8_lossy(&body).contains("disk exploded"));
    }

    #[tokio::test]
    async fn database_error_maps_to_500() {
        let db_err = DatabaseError::NotFound {
            entity_type: "patient".into(),
            id: "1".into(),
        };
        let api_err: ApiError = db_err.into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
