//! Domain entities for the property-management backend.

pub mod archive;
pub mod lease;
pub mod property;
pub mod tenant;
pub mod user;

pub use archive::{toggle_archived, ArchiveState, ArchiveToggle};
pub use lease::{active_lease, Lease, LeaseTerms, NewLease};
pub use property::{NewProperty, Property};
pub use tenant::{NewTenant, Tenant};
pub use user::{NewUser, Role, User};
