//! HTTP response types and error mapping
//!
//! Every failure leaves the API as `{"success": false, "error": "..."}` with
//! status 500; catalogs are either complete or absent.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::AppError;
use crate::models::ChannelRecord;

/// Body of a successful `/api/channels` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelsResponse {
    pub success: bool,
    pub channels: Vec<ChannelRecord>,
}

impl ChannelsResponse {
    pub fn new(channels: Vec<ChannelRecord>) -> Self {
        Self {
            success: true,
            channels,
        }
    }
}

/// Uniform error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Convert AppError to the JSON error envelope
pub fn handle_error(error: AppError) -> Response {
    error!("Request failed: {}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(error.to_string())),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_error(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceError;

    #[test]
    fn test_error_envelope_shape() {
        let body = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_channels_envelope_shape() {
        let body = serde_json::to_value(ChannelsResponse::new(Vec::new())).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "channels": []}));
    }

    #[test]
    fn test_source_errors_map_to_500() {
        let error: AppError = SourceError::unavailable(SourceError::NotConfigured).into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
