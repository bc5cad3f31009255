//! Domain services

pub mod identity;
pub mod tenancy;

pub use identity::{AuthSuccess, CreateUserInput, IdentityService, UpdateUserInput};
pub use tenancy::{
    LeaseChanges, LeaseDetails, PropertyChanges, PropertyDetails, TenancyService, TenantDetails,
    UpdateTenant,
};
