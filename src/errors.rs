use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::services::upstream::UpstreamError;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Upstream rejected request for model '{model}': {source}")]
    UpstreamRejected {
        model: String,
        #[source]
        source: UpstreamError,
    },

    #[error("All {attempts} candidate models failed; last error: {source}")]
    UpstreamExhausted {
        attempts: usize,
        #[source]
        source: UpstreamError,
    },

    #[error("Failed to parse AI response as JSON: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UpstreamRejected { .. } => "UPSTREAM_REJECTED",
            AppError::UpstreamExhausted { .. } => "UPSTREAM_EXHAUSTED",
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// The upstream failure behind this error, if it came from the model API.
    pub fn upstream_cause(&self) -> Option<&UpstreamError> {
        match self {
            AppError::UpstreamRejected { source, .. } | AppError::UpstreamExhausted { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UpstreamRejected { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
