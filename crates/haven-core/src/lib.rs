//! # Haven Core
//!
//! Domain entities, authorization policy, repository traits, and domain
//! services for the property-management backend.

pub mod domain;
pub mod error;
pub mod policy;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
