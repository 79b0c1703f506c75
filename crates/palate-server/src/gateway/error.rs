use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use palate::EngineError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("vendor not found: {0}")]
    VendorNotFound(String),

    #[error("recommendation lookup failed: {0}")]
    EngineFailed(String),
}

impl From<EngineError> for GatewayError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::VendorNotFound { vendor_id } => GatewayError::VendorNotFound(vendor_id),
            EngineError::InvalidLimit { value } => {
                GatewayError::InvalidRequest(format!("limit must be positive, got {value}"))
            }
            EngineError::Repository(source) => GatewayError::EngineFailed(source.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::VendorNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::EngineFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
