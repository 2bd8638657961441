//! Monster Index service
//!
//! Main entry point. Serves the price history and the ingestion trigger
//! over HTTP; scheduling ingestion is left to an external caller.

use monster_index::config::AppConfig;
use monster_index::database::{create_pool, ensure_schema};
use monster_index::error::{map_to_app_error, AppError, AppResult};
use monster_index::pricing::OdaPriceFetcher;
use monster_index::template::PageTemplate;
use monster_index::{http, telemetry, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    telemetry::init(&config);

    info!("Monster Index starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);

    // Compile the page once; every request renders from this copy
    let page = PageTemplate::index().map_err(|e| {
        error!("Page template is invalid: {}", e);
        AppError::Template(e)
    })?;

    info!("Opening database at {}", config.database.path);

    let pool = create_pool(&config.database).await.map_err(|e| {
        error!("Failed to create database pool: {}", e);
        AppError::Database(e)
    })?;

    ensure_schema(&pool).await.map_err(|e| {
        error!("Database schema setup failed: {}", e);
        AppError::Database(e)
    })?;

    info!(
        "Database ready (max connections: {})",
        config.database.max_connections
    );

    if config.is_production() && config.fetcher.accept_invalid_certs {
        warn!("TLS certificate verification is disabled for the price endpoint");
    }

    let fetcher = OdaPriceFetcher::new(&config.fetcher)?;
    info!("Price endpoint: {}", fetcher.endpoint());

    let state = AppState::new(pool.clone(), Arc::new(fetcher), page, config.site.clone());
    let app = http::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = map_to_app_error(TcpListener::bind(addr).await, "Failed to bind listener")?;

    info!("App live and listening on port: {}", config.port);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        error!("HTTP server error: {}", e);
        return Err(AppError::Message(format!("HTTP server error: {}", e)));
    }

    pool.close().await;
    info!("Monster Index shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // Keep serving; the process can still be stopped externally
        futures::future::pending::<()>().await;
    }
    info!("Shutdown signal received, shutting down gracefully...");
}
