//! Property repository trait (port)

use async_trait::async_trait;

use crate::domain::{NewProperty, Property};
use crate::error::DomainError;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Property>, DomainError>;
    async fn create(&self, property: &NewProperty) -> Result<Property, DomainError>;
    async fn update(&self, property: &Property) -> Result<Property, DomainError>;
}
