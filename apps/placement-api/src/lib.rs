//! # Order Placement API
//!
//! HTTP front door for `placement-core`.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Placement API                                    │
//! │                                                                         │
//! │  client ──► middleware ──► routes ──► OrderProcessor ──► presenter     │
//! │             (panic, CORS,   (bind      (placement-core)   (envelope)    │
//! │              request id,     JSON)                                      │
//! │              tracing)                                                   │
//! │                                                                         │
//! │  ApiError ──► { "error": "invalid input" } 400                          │
//! │           └─► { "error": "internal server error" } 500                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `SERVICE_NAME` - reported by `/health` (default: order-placement-system)
//! - `APP_VERSION` - reported by `/health` (default: v1.0.5)
//! - `LOG_LEVEL` - tracing filter when `RUST_LOG` is unset (default: info)
//! - `LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `PORT` - HTTP port (default: 8080)
//! - `SHUTDOWN_TIMEOUT_SECS` - graceful drain bound (default: 5)
//! - `REPAIR_TABLE_PATH` - TOML repair table replacing the built-in one
//! - `FILM_TYPE_WHITELIST` - comma-separated extra film types

use std::sync::Arc;

use axum::Router;
use placement_core::OrderProcessor;

pub mod config;
pub mod error;
pub mod middleware;
pub mod presenter;
pub mod routes;

// Re-exports
pub use config::{ApiConfig, ConfigError, LogFormat};
pub use error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<OrderProcessor>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(processor: OrderProcessor, config: ApiConfig) -> Self {
        AppState {
            processor: Arc::new(processor),
            config: Arc::new(config),
        }
    }
}

/// Full application: routes, state and middleware.
pub fn build_router(state: AppState) -> Router {
    middleware::apply(routes::routes().with_state(state))
}
