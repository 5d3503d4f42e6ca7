//! Shared error types for Pulseboard.
//!
//! Storage-level errors live in `pulseboard-store`; this module only holds
//! the validation error produced when an inbound event fails its boundary
//! checks. Validation failures are terminal: the event is rejected, never
//! retried, and never touches either store.

use thiserror::Error;

/// A malformed or incomplete inbound event.
///
/// Carries the name of the offending wire field so the HTTP layer can
/// report it back to the producer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field '{field}': {message}")]
pub struct ValidationError {
    /// Wire name of the field that failed validation (e.g. "personaId").
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    /// A required field was absent or empty.
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            message: "missing or empty".to_string(),
        }
    }

    /// The action tag is not part of the stream's closed enumeration.
    pub fn unknown_action(raw: &str) -> Self {
        Self {
            field: "action",
            message: format!("unrecognized action '{}'", raw),
        }
    }
}
