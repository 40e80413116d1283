//! API error types with the envelope shapes the HTTP surface has always
//! used: `{success: false, error, ...}` plus a status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::api::types::endpoint_directory;

/// Canonical guidance for a request with no usable input.
const INVALID_INPUT_MESSAGE: &str =
    "Invalid input. Please provide \"userInput\" as a string.";
const INVALID_INPUT_EXAMPLE: &str = "Patient has high blood pressure";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("endpoint not found")]
    NotFound,
}

impl ApiError {
    /// The standard missing-input rejection with its example payload.
    pub fn invalid_input() -> Self {
        Self::InvalidInput(INVALID_INPUT_MESSAGE.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidInput(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": message,
                    "example": { "userInput": INVALID_INPUT_EXAMPLE },
                })),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Internal server error occurred while processing your request.",
                        "message": detail,
                    })),
                )
                    .into_response()
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "error": "Endpoint not found",
                    "availableEndpoints": endpoint_directory(),
                    "message": "Please use one of the available endpoints listed above.",
                })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn invalid_input_returns_400_with_example() {
        let response = ApiError::invalid_input().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("Invalid input"));
        assert_eq!(json["example"]["userInput"], INVALID_INPUT_EXAMPLE);
    }

    #[tokio::test]
    async fn internal_returns_500_with_generic_error() {
        let response = ApiError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("Internal server error"));
        assert_eq!(json["message"], "boom");
    }

    #[tokio::test]
    async fn not_found_returns_404_with_directory() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Endpoint not found");
        assert!(json["availableEndpoints"]["GET /health"].is_string());
    }
}
