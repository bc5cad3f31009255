//! # Haven Security
//!
//! Password hashing and signed-token services.

pub mod password;
pub mod token;

pub use password::{PasswordError, PasswordService};
pub use token::{Claims, TokenError, TokenService};
