//! Stream-specific auxiliary event fields.
//!
//! These are closed structs with named optional fields rather than opaque
//! JSON bags. Unknown inbound fields are ignored by serde, which keeps
//! forward compatibility with newer producers without loosening the shape.

use serde::{Deserialize, Serialize};

/// Auxiliary fields attached to warmup activity events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmupDetails {
    /// Search term for `search` / `explore` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Video URL for `video_watch` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Handle of the profile acted on (`like`, `profile_visit`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,

    /// How long the action took, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Free-text note, mostly used by `error` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Auxiliary fields attached to scheduled-post lifecycle events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetails {
    /// Producer-side identifier for the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,

    /// Post caption, as scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// When the post was scheduled to go out (producer-formatted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,

    /// Failure reason for `post_failed` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
