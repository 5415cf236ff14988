//! HTTP routes.
//!
//! ```text
//! GET  /health                  liveness + service identity
//! POST /api/v1/orders/process   raw platform lines → cleaned lines
//! ```

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use placement_core::{CleanedOrder, CoreResult, InputOrder, Price};

use crate::error::ApiError;
use crate::presenter::{success, SuccessBody};
use crate::AppState;

pub const HEALTH_PATH: &str = "/health";
pub const PROCESS_ORDERS_PATH: &str = "/api/v1/orders/process";

/// Every registered route as `(method, path)`, for startup logging.
pub const ROUTES: [(&str, &str); 2] = [("GET", HEALTH_PATH), ("POST", PROCESS_ORDERS_PATH)];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(HEALTH_PATH, get(health_check))
        .route(PROCESS_ORDERS_PATH, post(process_orders))
}

/// Logs the route table.
pub fn log_routes() {
    tracing::info!(count = ROUTES.len(), "Registered routes");
    for (method, path) in ROUTES {
        tracing::info!(method, path, "Route registered");
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.config.service_name.clone(),
        version: state.config.app_version.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

// =============================================================================
// Orders
// =============================================================================

/// Wire form of one input line. Prices arrive as plain numbers and become
/// [`Price`]s only after binding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputOrderRequest {
    pub no: i64,
    pub platform_product_id: String,
    pub qty: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

impl InputOrderRequest {
    pub fn into_input_order(self) -> CoreResult<InputOrder> {
        Ok(InputOrder {
            no: self.no,
            platform_product_id: self.platform_product_id,
            qty: self.qty,
            unit_price: Price::new(self.unit_price)?,
            total_price: Price::new(self.total_price)?,
        })
    }
}

/// Binds the request body. Malformed JSON and an empty array are rejected;
/// `null` entries are kept for the core to reject.
fn bind_orders(body: &[u8]) -> Result<Vec<Option<InputOrder>>, ApiError> {
    let requests: Vec<Option<InputOrderRequest>> = serde_json::from_slice(body).map_err(|e| {
        tracing::error!(error = %e, "failed to bind JSON");
        ApiError::InvalidInput(e.to_string())
    })?;

    if requests.is_empty() {
        tracing::error!("empty orders array");
        return Err(ApiError::InvalidInput("empty orders array".to_string()));
    }

    requests
        .into_iter()
        .map(|request| request.map(InputOrderRequest::into_input_order).transpose())
        .collect::<CoreResult<Vec<_>>>()
        .map_err(ApiError::from)
}

async fn process_orders(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessBody<Vec<CleanedOrder>>>, ApiError> {
    let orders = bind_orders(&body)?;

    let cleaned = state.processor.process_optional(&orders).inspect_err(|e| {
        tracing::error!(error = %e, "failed to process orders");
    })?;

    Ok(success(cleaned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_orders() {
        let body = br#"[{"no":1,"platformProductId":"FG0A-CLEAR-X","qty":2,"unitPrice":50,"totalPrice":100}, null]"#;
        let orders = bind_orders(body).unwrap();

        assert_eq!(orders.len(), 2);
        assert!(orders[1].is_none());
        let first = orders[0].as_ref().unwrap();
        assert_eq!(first.total_price, Price::new(100.0).unwrap());
    }

    #[test]
    fn test_bind_orders_rejections() {
        assert!(bind_orders(b"").is_err());
        assert!(bind_orders(b"{ invalid json }").is_err());
        assert!(bind_orders(b"[]").is_err());
        assert!(bind_orders(br#"[{"no":1,"platformProductId":"X","qty":1}]"#).is_err());
        assert!(bind_orders(br#"[{"no":1,"platformProductId":"X","qty":1,"unitPrice":-1,"totalPrice":0}]"#).is_err());
    }
}
