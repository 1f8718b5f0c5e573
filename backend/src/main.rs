//! ServiceHub Backend Server
//!
//! Entry point: loads configuration, selects the store, wires services and
//! serves the REST API.

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use servicehub_server::config::{Config, StoreBackend};
use servicehub_server::db;
use servicehub_server::payment::RazorpayGateway;
use servicehub_server::repository::{MemoryStore, PgStore};
use servicehub_server::routes;
use servicehub_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(
        environment = %config.environment.as_str(),
        store = ?config.store_backend,
        "Starting ServiceHub API"
    );

    let gateway = Arc::new(
        RazorpayGateway::new(&config.gateway).context("Failed to build payment gateway client")?,
    );

    let app_state = match config.store_backend {
        StoreBackend::Postgres => {
            let db_pool = db::connect(&config)
                .await
                .context("Failed to connect to database")?;
            db::migrate(&db_pool)
                .await
                .context("Failed to run migrations")?;

            AppState::from_store(
                Arc::new(PgStore::new(db_pool.clone())),
                gateway,
                &config.gateway,
                config.jwt_secret.clone(),
                config.jwt_access_token_ttl_seconds,
                Some(db_pool),
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            AppState::from_store(
                Arc::new(MemoryStore::new()),
                gateway,
                &config.gateway,
                config.jwt_secret.clone(),
                config.jwt_access_token_ttl_seconds,
                None,
            )
        }
    };

    let app = routes::app_router(app_state).layer(configure_cors(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn configure_cors(config: &Config) -> CorsLayer {
    let allowed_origins = config.cors_allowed_origins.as_deref().unwrap_or_default();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
