//! Response bodies for the HTTP API.

use pulseboard_commons::{Event, ValidationError};
use serde::Serialize;

/// Success acknowledgement for an ingested event, echoing the stamped
/// event back to the producer.
#[derive(Debug, Serialize)]
pub struct SubmitResponse<A, D> {
    pub status: &'static str,
    pub event: Event<A, D>,
}

impl<A, D> SubmitResponse<A, D> {
    pub fn ok(event: Event<A, D>) -> Self {
        Self {
            status: "ok",
            event,
        }
    }
}

/// Error body for 400/500 responses.
///
/// Validation rejections name the offending wire field; backend
/// failures carry a deliberately generic message with no internals.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl ErrorBody {
    pub fn validation(err: &ValidationError) -> Self {
        Self {
            error: err.to_string(),
            field: Some(err.field),
        }
    }

    pub fn backend_unavailable() -> Self {
        Self {
            error: "backend unavailable".to_string(),
            field: None,
        }
    }
}

/// Result of an administrative clear.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    /// Total keys removed across the counter records and the event log.
    pub removed: usize,
}

/// Liveness probe body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
