//! API error translation
//!
//! Domain failures become status codes and `{"message": ...}` bodies here;
//! handlers just bubble errors up with `?`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use haven_core::DomainError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// No authorization header at all. Distinct from a bad token.
    #[error("Missing authorization header")]
    Unauthenticated,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Valid token, insufficient role. 401 per the existing contract.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct MessageBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Missing authorization header".to_string(),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::Unauthorized => {
                tracing::warn!("Request denied: insufficient role");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApiError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{} not found", entity))
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(MessageBody { message })).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UserNotFound => ApiError::NotFound("User"),
            DomainError::TenantNotFound => ApiError::NotFound("Tenant"),
            DomainError::PropertyNotFound => ApiError::NotFound("Property"),
            DomainError::LeaseNotFound => ApiError::NotFound("Lease"),
            DomainError::EmailAlreadyExists(email) => {
                ApiError::BadRequest(format!("{} is already registered", email))
            }
            DomainError::OverlappingLease => ApiError::BadRequest(
                "Lease overlaps an existing lease for this tenant".to_string(),
            ),
            DomainError::InvalidCredentials => ApiError::InvalidCredentials,
            DomainError::InvalidResetToken => {
                ApiError::BadRequest("Invalid or expired token".to_string())
            }
            DomainError::Validation(msg) => ApiError::BadRequest(msg),
            DomainError::PasswordHash(msg)
            | DomainError::Token(msg)
            | DomainError::Database(msg) => ApiError::Internal(msg),
        }
    }
}
