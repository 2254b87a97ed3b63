//! Unified API error handling
//!
//! Every endpoint fails with the same [`ErrorResponse`] body.

use actix_web::error::UrlencodedError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::AnalysisError;

/// Largest accepted url-encoded form body
pub const MAX_FORM_BYTES: usize = 64 * 1024;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// No model configured for the requested analysis (503)
    #[error("Analysis model unavailable: {0}")]
    ModelUnavailable(String),

    /// Uploaded bytes are not a readable image (422)
    #[error("Invalid image: {0}")]
    ImageDecode(String),

    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload above the configured limit (413)
    #[error("Upload exceeds {0} bytes")]
    PayloadTooLarge(usize),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::ModelUnavailable(_) => "model_unavailable",
            ApiError::ImageDecode(_) => "image_decode_error",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::ImageDecode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::ModelUnavailable(model) => ApiError::ModelUnavailable(model.to_string()),
            AnalysisError::ImageDecode(e) => ApiError::ImageDecode(e.to_string()),
        }
    }
}

/// Form extractor settings that report failures as [`ErrorResponse`]
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(MAX_FORM_BYTES)
        .error_handler(|err, _req| {
            let api_error = match err {
                UrlencodedError::Overflow { limit, .. } => ApiError::PayloadTooLarge(limit),
                other => ApiError::BadRequest(other.to_string()),
            };
            api_error.into()
        })
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
