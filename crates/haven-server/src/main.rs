use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use haven_api::{router, AppState};
use haven_core::services::{IdentityService, TenancyService};
use haven_infrastructure::database::postgres::{
    PgLeaseRepository, PgPropertyRepository, PgTenantRepository, PgUserRepository,
};
use haven_infrastructure::database::{connection, migrations};
use haven_security::{PasswordService, TokenService};
use haven_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    haven_shared::telemetry::init_telemetry();

    info!("Haven server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to database
    info!("Connecting to database...");
    let pool = connection::create_pool(&config.database).await?;
    migrations::run(&pool).await?;
    info!("Database connection established.");

    // Wire repositories and services
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let tenants = Arc::new(PgTenantRepository::new(pool.clone()));
    let properties = Arc::new(PgPropertyRepository::new(pool.clone()));
    let leases = Arc::new(PgLeaseRepository::new(pool));

    let passwords = PasswordService::new(config.auth.bcrypt_cost);
    let tokens = Arc::new(TokenService::new(
        &config.auth.secret,
        config.auth.access_token_expiry,
        config.auth.reset_token_expiry,
    ));

    let state = AppState {
        identity: Arc::new(IdentityService::new(users, passwords, tokens.clone())),
        tenancy: Arc::new(TenancyService::new(tenants, properties, leases)),
        tokens,
    };

    // Build router
    let app = router(state);

    // Bind address
    let host: std::net::IpAddr = config
        .app
        .host
        .parse()
        .map_err(|_| haven_shared::AppError::ListenAddr(config.app.host.clone()))?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
