//! Tenant repository trait (port)

use async_trait::async_trait;

use crate::domain::{NewTenant, Tenant};
use crate::error::DomainError;

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Tenant>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Tenant>, DomainError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tenant>, DomainError>;
    /// Creates the tenant, its staff links, and the optional initial lease
    /// in one transaction.
    async fn create(&self, tenant: &NewTenant) -> Result<Tenant, DomainError>;
    /// Updates the tenant row; when `staff_ids` is given the staff links
    /// are replaced in the same transaction.
    async fn update(
        &self,
        tenant: &Tenant,
        staff_ids: Option<&[i32]>,
    ) -> Result<Tenant, DomainError>;
    async fn staff_ids(&self, tenant_id: i32) -> Result<Vec<i32>, DomainError>;
}
