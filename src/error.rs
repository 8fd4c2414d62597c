//! Request-level error type.
//!
//! Every service returns `Result<T, ApiError>`; the `IntoResponse` impl is the
//! one place where failures become HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid identifier, or the referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Missing or empty input, or an unparseable body.
    #[error("{0}")]
    BadRequest(String),

    /// No usable bearer token.
    #[error("{0}")]
    Unauthorized(String),

    /// Caller does not own the record.
    #[error("{0}")]
    Forbidden(String),

    /// A write completed without returning a record.
    #[error("{0}")]
    Server(String),

    /// Database failure.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Server(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, %status, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }

        // Don't leak database errors to clients
        let message = match &self {
            Self::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        ApiResponse::new(status, (), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_per_kind() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Server("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn error_response_is_a_failed_envelope() {
        let response = ApiError::NotFound("Address not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["message"], "Address not found");
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn store_errors_are_masked() {
        let response =
            ApiError::from(anyhow::anyhow!("connection refused to 10.0.0.1")).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "Internal server error");
    }
}
