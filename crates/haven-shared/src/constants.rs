//! Application-wide constants

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;
pub const RESET_TOKEN_EXPIRY: i64 = 600;
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const RECENT_USERS_LIMIT: i64 = 3;
