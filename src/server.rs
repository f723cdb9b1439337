//! HTTP server initialization and runtime setup.
//!
//! Handles the setup store, outbound clients, and Axum server lifecycle.

use crate::application::services::{OnboardingService, SetupService};
use crate::config::Config;
use crate::domain::repositories::SetupRepository;
use crate::infrastructure::backend::HttpOnboardingClient;
use crate::infrastructure::persistence::{MemorySetupRepository, PgSetupRepository};
use crate::infrastructure::shopify::SessionTokenGuard;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Setup store: PostgreSQL pool plus migrations, or the in-memory store
///   when `DATABASE_URL` is unset
/// - Onboarding backend client
/// - Session token guard
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The backend URL cannot be used as an endpoint
/// - A custom shop domain yields an invalid pattern
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let setup_repository = connect_setup_store(&config).await?;

    let onboarding_client = HttpOnboardingClient::from_config(&config.backend)?;
    tracing::info!(
        endpoint = %onboarding_client.endpoint(),
        "Onboarding backend configured"
    );

    let session_guard = SessionTokenGuard::from_config(&config.shopify)?;

    let state = AppState::new(
        Arc::new(config.shopify.clone()),
        Arc::new(session_guard),
        Arc::new(OnboardingService::new(Arc::new(onboarding_client))),
        Arc::new(SetupService::new(setup_repository)),
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_setup_store(config: &Config) -> Result<Arc<dyn SetupRepository>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set; setup status is kept in memory");
        return Ok(Arc::new(MemorySetupRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    Ok(Arc::new(PgSetupRepository::new(Arc::new(pool))))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
