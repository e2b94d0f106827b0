use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

use crate::core::MatchError;
use crate::models::ErrorResponse;
use crate::services::{BackendError, PostgresError};

/// Service-level error, mapped onto HTTP responses
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("Adopter store error: {0}")]
    Database(#[from] PostgresError),

    #[error("Pet backend error: {0}")]
    PetBackend(#[from] BackendError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl AppError {
    /// Short machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Match(MatchError::IncompleteAssessment { .. }) => "incomplete_assessment",
            AppError::Match(MatchError::OutOfRange { .. }) => "out_of_range",
            AppError::Match(MatchError::Schema(_)) => "schema_error",
            AppError::Match(MatchError::AdopterNotFound(_)) => "adopter_not_found",
            AppError::Validation(_) => "validation_failed",
            AppError::InvalidPayload(_) => "invalid_payload",
            AppError::Database(_) => "database_error",
            AppError::PetBackend(_) => "pet_backend_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Match(MatchError::IncompleteAssessment { .. })
            | AppError::Match(MatchError::OutOfRange { .. })
            | AppError::Validation(_)
            | AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Match(MatchError::AdopterNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::PetBackend(_) => StatusCode::BAD_GATEWAY,
            AppError::Match(MatchError::Schema(_))
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    AppError::InvalidPayload(format!("Invalid JSON: {}", err)).into()
}

/// Handle path parameter errors (e.g. a non-numeric adopter id)
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Path error on {}: {}", req.path(), err);
    AppError::InvalidPayload(format!("Invalid path: {}", err)).into()
}
