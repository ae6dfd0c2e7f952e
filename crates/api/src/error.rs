use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use json_share_core::error::{DomainError, ValidationErrors};
use json_share_core::identity::SignatureError;
use serde_json::json;

/// API error type that maps domain outcomes to JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("validation failed")]
    Validation(ValidationErrors),

    #[error("unauthorized")]
    Unauthorized,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => ApiError::Validation(errors),
            DomainError::NotFound => ApiError::NotFound("Document not found".to_string()),
            DomainError::Conflict(msg) => ApiError::Conflict(msg),
            DomainError::Unavailable(msg) => ApiError::Unavailable(msg),
            DomainError::Store(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<SignatureError> for ApiError {
    fn from(err: SignatureError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg, None),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validationError",
                "Validation failed".to_string(),
                Some(errors.errors),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Authentication required".to_string(),
                None,
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Unavailable(msg) => {
                tracing::warn!("store unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "unavailable",
                    "Database connection error. Please try again.".to_string(),
                    None,
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });
        if let Some(details) = details {
            body["error"]["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
