//! Postgres pool, migrations and liveness

use std::time::Duration;
use sqlx::postgres::{PgPoolOptions, Postgres};
use sqlx::Pool;
use tracing::info;
use crate::config::DatabaseConfig;
use crate::utils::errors::AppError;

pub type DatabasePool = Pool<Postgres>;

const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
}

/// Open the pool described by the `database` settings section and ping it once
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, AppError> {
    let pool = pool_options(config).connect(&config.url).await?;
    health_check(&pool).await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Apply pending migrations from `./migrations`
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

pub async fn health_check(pool: &DatabasePool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
