//! # Order Placement API
//!
//! HTTP server normalizing e-commerce order lines.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load config ──► init tracing ──► build processor ──► bind 0.0.0.0     │
//! │                                                          │              │
//! │                                                          ▼              │
//! │  exit ◄── drain (≤ SHUTDOWN_TIMEOUT_SECS) ◄── SIGINT / SIGTERM         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use placement_api::routes::log_routes;
use placement_api::{build_router, ApiConfig, AppState, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ApiConfig::load()?;

    // Initialize tracing
    init_tracing(&config);

    info!(
        service = %config.service_name,
        version = %config.app_version,
        "Starting order placement API..."
    );

    let processor = config.build_processor()?;
    info!(
        film_type_whitelist = ?config.film_type_whitelist,
        "Order processor ready"
    );

    let app = build_router(AppState::new(processor, config.clone()));
    log_routes();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting HTTP server");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            result??;
            info!("Server stopped");
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    let _ = shutdown_tx.send(());

    match tokio::time::timeout(config.shutdown_timeout, server).await {
        Ok(result) => {
            result??;
            info!("Server shutdown complete");
        }
        Err(_) => warn!(
            timeout_secs = config.shutdown_timeout.as_secs(),
            "Graceful shutdown timed out, exiting with requests in flight"
        ),
    }

    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over `LOG_LEVEL`.
fn init_tracing(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
