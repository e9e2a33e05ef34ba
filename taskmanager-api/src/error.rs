/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`; every `ApiError` renders as a JSON body
/// with a stable error code and a human-readable message.
///
/// | Variant           | Status |
/// |-------------------|--------|
/// | `NotFound`        | 404    |
/// | `Conflict`        | 400    |
/// | `ValidationError` | 422    |
/// | `InternalError`   | 500    |
///
/// # Example
///
/// ```
/// use taskmanager_api::error::{ApiError, ApiResult};
///
/// fn require(found: Option<i64>) -> ApiResult<i64> {
///     found.ok_or_else(|| ApiError::NotFound("User was not found".to_string()))
/// }
///
/// assert!(require(None).is_err());
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Referenced user or task does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate username (400)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request body failed validation (422)
    #[error("Validation failed: {} errors", .0.len())]
    ValidationError(Vec<ValidationErrorDetail>),

    /// Store or other unexpected failure (500)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "conflict")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    /// HTTP status this error is rendered with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn user_not_found() -> Self {
        ApiError::NotFound("User was not found".to_string())
    }

    pub fn task_not_found() -> Self {
        ApiError::NotFound("Task was not found".to_string())
    }

    pub fn username_taken() -> Self {
        ApiError::Conflict("Username already exists".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (error_code, message, details) = match self {
            ApiError::NotFound(msg) => ("not_found", msg, None),
            ApiError::Conflict(msg) => ("conflict", msg, None),
            ApiError::ValidationError(errors) => (
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Logged here, never sent to the client
                tracing::error!("Internal error: {}", msg);
                (
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Lookups use `fetch_optional` and report their own 404s, so a stray
/// `RowNotFound` is a 500 like any other store failure.
///
/// Constraint violations surface the races the handlers' own checks cannot
/// close: a username claimed concurrently, or an owner deleted between the
/// existence check and the task insert.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    if db_err.message().contains("users.username") {
                        return ApiError::username_taken();
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", db_err.message()));
                }

                if db_err.is_foreign_key_violation() {
                    return ApiError::user_not_found();
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert request validation failures to a 422 with one detail per failure
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        // HashMap iteration order is random
        details.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::ValidationError(details)
    }
}
