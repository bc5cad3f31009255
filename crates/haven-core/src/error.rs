//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found")]
    UserNotFound,

    #[error("Tenant not found")]
    TenantNotFound,

    #[error("Property not found")]
    PropertyNotFound,

    #[error("Lease not found")]
    LeaseNotFound,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Lease overlaps an existing lease for this tenant")]
    OverlappingLease,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<haven_security::PasswordError> for DomainError {
    fn from(e: haven_security::PasswordError) -> Self {
        DomainError::PasswordHash(e.to_string())
    }
}

impl From<haven_security::TokenError> for DomainError {
    fn from(e: haven_security::TokenError) -> Self {
        DomainError::Token(e.to_string())
    }
}
