//! PostgreSQL repository implementations

pub mod lease_repo_impl;
pub mod property_repo_impl;
pub mod tenant_repo_impl;
pub mod user_repo_impl;

pub use lease_repo_impl::PgLeaseRepository;
pub use property_repo_impl::PgPropertyRepository;
pub use tenant_repo_impl::PgTenantRepository;
pub use user_repo_impl::PgUserRepository;

use haven_core::error::DomainError;

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

pub(crate) fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!("Database error {}: {}", context, e);
    DomainError::Database(e.to_string())
}
