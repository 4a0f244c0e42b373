//! Error handling module
//!
//! Every failure a handler can produce is one of the [`AppError`] variants.
//! Response bodies are deliberately generic: the detail carried by each
//! variant is logged, never sent to the client.

use crate::db::StoreError;
use crate::models::{ErrorResponse, ErrorsResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, error, warn};
use validator::ValidationErrors;

pub const VALIDATION_ERRORS: &str = "validation errors";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or empty, or a create could not be completed
    #[error("Validation error: {0}")]
    Validation(String),

    /// No record of the named entity has the requested id
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Any other failure while updating a record
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// Storage failure on a read or delete
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Unexpected(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Validation(detail) => {
                debug!("Validation failed: {}", detail);
                (status, Json(ErrorsResponse::single(VALIDATION_ERRORS))).into_response()
            }
            AppError::NotFound(_) => {
                (status, Json(ErrorResponse::new(self.to_string()))).into_response()
            }
            AppError::Unexpected(detail) => {
                warn!("Unexpected error: {}", detail);
                (status, Json(ErrorsResponse::single(UNEXPECTED_ERROR))).into_response()
            }
            AppError::Storage(e) => {
                error!("Storage error: {:?}", e);
                (status, Json(ErrorsResponse::single(UNEXPECTED_ERROR))).into_response()
            }
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create a validation error
pub fn validation_error(msg: impl Display) -> AppError {
    AppError::Validation(msg.to_string())
}

/// Helper function to create an unexpected error
pub fn unexpected_error(msg: impl Display) -> AppError {
    AppError::Unexpected(msg.to_string())
}

/// Helper function to create a not found error
pub fn not_found_error(entity: &'static str) -> AppError {
    AppError::NotFound(entity)
}

/// A create that storage refused is reported like any other invalid payload
pub fn rejected_write(e: StoreError) -> AppError {
    warn!("Write rejected by storage: {}", e);
    AppError::Validation(e.to_string())
}
