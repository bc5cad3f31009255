//! Database migrations

use sqlx::PgPool;

/// Runs the embedded schema migrations. Idempotent; call at startup.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
