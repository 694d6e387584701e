//! Error types shared by the registry, the services and the HTTP layer.
//!
//! [`StorageError`] is what the Link Registry reports; [`AppError`] is the
//! taxonomy surfaced to callers. Validation failures are raised before any
//! storage call is made.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

/// Failure of the durable store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage operation timed out")]
    Timeout,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the shorten and redirect operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL provided")]
    InvalidUrl,

    #[error("Invalid custom slug. Use 3-50 alphanumeric characters, hyphens, or underscores.")]
    InvalidSlug,

    #[error("This custom slug is already taken. Please try another one.")]
    SlugTaken { slug: String },

    #[error("Failed to generate unique short code. Please try again.")]
    GenerationExhausted { attempts: u32 },

    #[error("Short URL not found")]
    NotFound { code: String },

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// JSON error body returned to HTTP clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl AppError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl => "invalid_url",
            AppError::InvalidSlug => "invalid_slug",
            AppError::SlugTaken { .. } => "slug_taken",
            AppError::GenerationExhausted { .. } => "generation_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Storage(StorageError::Timeout) => "storage_timeout",
            AppError::Storage(_) => "storage_error",
        }
    }

    /// HTTP status classification.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl | AppError::InvalidSlug | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::SlugTaken { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::GenerationExhausted { .. } | AppError::Storage(StorageError::Timeout) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients. Storage internals stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Storage(StorageError::Timeout) => {
                "Storage operation timed out. Please try again.".to_string()
            }
            AppError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.public_message(),
            code: self.code(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::BadRequest(format!("Invalid request: {errors}"))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "Request failed: {}", self);
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_client_errors() {
        assert_eq!(AppError::InvalidUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidSlug.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::BadRequest("Short code is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_slug_taken_is_conflict() {
        let err = AppError::SlugTaken {
            slug: "promo".into(),
        };
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "slug_taken");
    }

    #[test]
    fn test_not_found() {
        let err = AppError::NotFound { code: "nope".into() };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Short URL not found");
    }

    #[test]
    fn test_generation_exhausted_is_retryable() {
        let err = AppError::GenerationExhausted { attempts: 10 };
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_storage_error_hides_details() {
        let err = AppError::from(StorageError::Unavailable("lock poisoned".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "storage_error");
        assert!(!err.public_message().contains("poisoned"));
    }

    #[test]
    fn test_storage_timeout() {
        let err = AppError::from(StorageError::Timeout);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "storage_timeout");
    }

    #[test]
    fn test_sqlx_error_converts_to_storage() {
        let err: StorageError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StorageError::Database(_)));
    }
}
