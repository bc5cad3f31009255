//! Lease repository trait (port)
//!
//! Every relationship traversal (property -> leases -> tenants) is an
//! explicit query here; nothing loads lazily.

use async_trait::async_trait;

use crate::domain::{Lease, NewLease};
use crate::error::DomainError;

#[async_trait]
pub trait LeaseRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Lease>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Lease>, DomainError>;
    async fn find_by_property(&self, property_id: i32) -> Result<Vec<Lease>, DomainError>;
    async fn find_by_tenant(&self, tenant_id: i32) -> Result<Vec<Lease>, DomainError>;
    async fn create(&self, lease: &NewLease) -> Result<Lease, DomainError>;
    async fn update(&self, lease: &Lease) -> Result<Lease, DomainError>;
    /// Returns whether a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}
