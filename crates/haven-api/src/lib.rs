//! # Haven API
//!
//! HTTP handlers, auth middleware, DTOs, and error translation.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
