//! The event shape shared by both streams.

use super::{PersonaId, PostAction, PostDetails, WarmupAction, WarmupDetails};
use serde::{Deserialize, Serialize};

/// A single timestamped activity event.
///
/// Generic over the stream's action enum `A` and details struct `D`.
/// Events are immutable once appended to the log; the only mutation the
/// log ever performs is trimming old entries from the tail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event<A, D> {
    /// Producer-supplied occurrence time, epoch millis. Untrusted.
    pub timestamp: i64,

    /// Server-assigned arrival time, epoch millis. Set unconditionally at
    /// ingestion, overriding any client-supplied value, and used for log
    /// ordering since `timestamp` cannot be trusted.
    pub received_at: i64,

    /// The persona this event belongs to.
    pub persona_id: PersonaId,

    /// Action tag from the stream's closed enumeration.
    pub action: A,

    /// Optional stream-specific auxiliary fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<D>,

    /// Last-known human-readable label for the persona. Sticky: the
    /// counter record keeps the last non-empty value across events that
    /// omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

pub type WarmupEvent = Event<WarmupAction, WarmupDetails>;
pub type PostEvent = Event<PostAction, PostDetails>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_is_camel_case() {
        let event = WarmupEvent {
            timestamp: 1_000,
            received_at: 2_000,
            persona_id: PersonaId::new("green"),
            action: WarmupAction::Like,
            details: None,
            display_name: Some("Green".to_string()),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["receivedAt"], 2_000);
        assert_eq!(json["personaId"], "green");
        assert_eq!(json["action"], "like");
        assert_eq!(json["displayName"], "Green");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_round_trip_with_details() {
        let event = PostEvent {
            timestamp: 5,
            received_at: 6,
            persona_id: PersonaId::new("blue"),
            action: PostAction::PostScheduled,
            details: Some(PostDetails {
                post_id: Some("p-9".to_string()),
                ..Default::default()
            }),
            display_name: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: PostEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
