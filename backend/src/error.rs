//! Service error handling
//!
//! Unified error type for the service layer and its conversion into the
//! error body written by the command runner.

use nutritrack_shared::errors::EngineError;
use nutritrack_shared::validation::ValidationError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Service error type
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::BadRequest(_) => "BAD_REQUEST",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            ServiceError::Validation(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::BadRequest(msg) => msg.clone(),
            ServiceError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
        };

        ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
            },
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err.user_message())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ValidationError::from(errors).into()
    }
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        ServiceError::BadRequest(err.to_string())
    }
}

/// Result type alias for services
pub type ServiceResult<T> = Result<T, ServiceError>;
