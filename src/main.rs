//! ArtistCalendar API server
//!
//! Main application entry point

use std::time::Duration;
use anyhow::Context;
use tracing::{info, warn};

use ArtistCalendar::{
    config::Settings,
    database::{connection, DatabaseService},
    handlers::{build_router, cors_layer, AppState},
    middleware::SubmissionRateLimiter,
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", ArtistCalendar::info());

    let database = if settings.database.in_memory {
        warn!("Using the in-memory store; data is lost on restart");
        DatabaseService::in_memory()
    } else {
        info!("Connecting to database...");
        let pool = connection::create_pool(&settings.database).await?;

        info!("Running database migrations...");
        connection::run_migrations(&pool).await?;

        DatabaseService::new(pool)
    };

    info!("Initializing services...");
    let services = ServiceFactory::new(&settings, database)?;
    if !services.storage_service.is_enabled() {
        warn!("Photo storage is not configured; photo URLs cannot be signed");
    }

    let rate_limiter = SubmissionRateLimiter::new(&settings.rate_limit)?;
    spawn_limiter_cleanup(rate_limiter.clone());

    let app = build_router(AppState::new(services, rate_limiter)).layer(cors_layer(&settings.server));

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    info!(address = %address, "ArtistCalendar is ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ArtistCalendar has been shut down.");
    Ok(())
}

/// Periodically drop limiter state for idle users
fn spawn_limiter_cleanup(rate_limiter: SubmissionRateLimiter) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup();
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
