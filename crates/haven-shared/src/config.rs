//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants;
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

/// Credential settings handed to the identity component at construction.
/// Nothing else in the workspace reads the signing secret.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub secret: String,
    pub access_token_expiry: i64,
    pub reset_token_expiry: i64,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "haven-server")?
            .set_default("database.max_connections", 10)?
            .set_default(
                "auth.access_token_expiry",
                constants::DEFAULT_ACCESS_TOKEN_EXPIRY,
            )?
            .set_default("auth.reset_token_expiry", constants::RESET_TOKEN_EXPIRY)?
            .set_default("auth.bcrypt_cost", constants::DEFAULT_BCRYPT_COST as i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
