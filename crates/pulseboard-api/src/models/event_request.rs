//! Inbound event payload.

use pulseboard_core::EventDraft;
use serde::Deserialize;

/// JSON body accepted by `POST /v1/{stream}/events`.
///
/// Everything is optional at this layer — presence checks belong to the
/// ingestion service, which rejects with the offending field name.
/// Producers are browser extensions with drifting payload shapes, so the
/// persona id and display name accept their historical aliases, and
/// unknown fields anywhere in the body are ignored.
///
/// # Example
/// ```json
/// {
///   "personaId": "green",
///   "action": "like",
///   "timestamp": 1756500000000,
///   "username": "Green Machine",
///   "details": {"targetHandle": "@someone"}
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEventRequest<D> {
    #[serde(default, alias = "entityId", alias = "profileId")]
    pub persona_id: Option<String>,

    #[serde(default)]
    pub action: Option<String>,

    /// Producer-supplied occurrence time, epoch millis. A supplied
    /// `receivedAt` is deliberately not accepted here: arrival time is
    /// always server-assigned.
    #[serde(default)]
    pub timestamp: Option<i64>,

    #[serde(default, alias = "username", alias = "handle")]
    pub display_name: Option<String>,

    #[serde(default)]
    pub details: Option<D>,
}

impl<D> From<SubmitEventRequest<D>> for EventDraft<D> {
    fn from(req: SubmitEventRequest<D>) -> Self {
        EventDraft {
            persona_id: req.persona_id,
            action: req.action,
            timestamp: req.timestamp,
            display_name: req.display_name,
            details: req.details,
        }
    }
}
