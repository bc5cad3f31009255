//! User repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewUser, Role, User};
use crate::error::DomainError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError>;
    /// Newest first, capped at `limit`.
    async fn find_recent_by_role(&self, role: Role, limit: i64) -> Result<Vec<User>, DomainError>;
    /// Case-insensitive substring match against first or last name.
    async fn find_by_role_and_name(&self, role: Role, text: &str)
        -> Result<Vec<User>, DomainError>;
    /// Role unset and not archived.
    async fn find_unassigned(&self) -> Result<Vec<User>, DomainError>;
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    async fn update(&self, user: &User) -> Result<User, DomainError>;
    async fn touch_last_active(&self, id: i32, at: DateTime<Utc>) -> Result<(), DomainError>;
}
