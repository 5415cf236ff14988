//! Response envelopes.
//!
//! ```text
//! success: { "status": "success", "data": <payload> }
//! failure: { "error": "<message>" }
//! ```

use axum::Json;
use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub status: &'static str,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody { error: error.into() }
    }
}

/// Wraps `data` in the success envelope.
pub fn success<T: Serialize>(data: T) -> Json<SuccessBody<T>> {
    Json(SuccessBody {
        status: STATUS_SUCCESS,
        data,
    })
}
