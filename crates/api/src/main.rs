use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booklib_api::config::ServerConfig;
use booklib_api::router::build_app_router;
use booklib_api::shutdown::{close_pool, drain_server, shutdown_signal};
use booklib_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booklib_api=debug,booklib_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database.display_target(),
        "Loaded server configuration",
    );

    // --- Database ---
    let pool = booklib_db::create_pool(
        config.database.connect_options(),
        config.database.max_connections,
    )
    .await
    .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    booklib_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    booklib_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Router ---
    let state = AppState::new(pool.clone());
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid SERVER_HOST address")?,
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, "Starting server");

    let shutdown = CancellationToken::new();
    let server_shutdown = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { server_shutdown.cancelled().await })
            .await
    });

    tokio::select! {
        () = shutdown_signal() => {}
        result = &mut server => {
            close_pool(&pool, Duration::from_secs(config.shutdown_timeout_secs)).await;
            return result
                .context("Server task panicked")?
                .context("Server error");
        }
    }

    // --- Drain ---
    shutdown.cancel();
    let window = Duration::from_secs(config.shutdown_timeout_secs);
    drain_server(server, window).await;

    // --- Post-shutdown cleanup ---
    close_pool(&pool, window).await;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}
