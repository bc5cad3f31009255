//! # Haven Shared
//!
//! Shared configuration, telemetry, time utilities, and constants for the
//! property-management backend.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod time;

pub use error::AppError;
