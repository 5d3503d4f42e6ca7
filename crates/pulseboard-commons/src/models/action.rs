//! Closed action enumerations, one per stream.
//!
//! Inbound events carry the action as a raw string; `StreamAction::parse`
//! is the single place where that string is checked against the stream's
//! closed set. An unrecognized tag is a validation failure, never a
//! silently dropped event.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Common behavior of a stream's closed action enumeration.
pub trait StreamAction:
    Copy + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Parses the wire tag; `None` for anything outside the closed set.
    fn parse(raw: &str) -> Option<Self>;

    /// The wire tag for this action.
    fn as_str(&self) -> &'static str;
}

/// Actions produced by warmup automation workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarmupAction {
    Like,
    Bookmark,
    Search,
    Explore,
    VideoWatch,
    SessionStart,
    SessionEnd,
    Error,
    Scroll,
    ProfileVisit,
}

impl StreamAction for WarmupAction {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "like" => Some(Self::Like),
            "bookmark" => Some(Self::Bookmark),
            "search" => Some(Self::Search),
            "explore" => Some(Self::Explore),
            "video_watch" => Some(Self::VideoWatch),
            "session_start" => Some(Self::SessionStart),
            "session_end" => Some(Self::SessionEnd),
            "error" => Some(Self::Error),
            "scroll" => Some(Self::Scroll),
            "profile_visit" => Some(Self::ProfileVisit),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Bookmark => "bookmark",
            Self::Search => "search",
            Self::Explore => "explore",
            Self::VideoWatch => "video_watch",
            Self::SessionStart => "session_start",
            Self::SessionEnd => "session_end",
            Self::Error => "error",
            Self::Scroll => "scroll",
            Self::ProfileVisit => "profile_visit",
        }
    }
}

/// Scheduled-post lifecycle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostAction {
    PostScheduled,
    PostPublished,
    PostFailed,
}

impl StreamAction for PostAction {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "post_scheduled" => Some(Self::PostScheduled),
            "post_published" => Some(Self::PostPublished),
            "post_failed" => Some(Self::PostFailed),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::PostScheduled => "post_scheduled",
            Self::PostPublished => "post_published",
            Self::PostFailed => "post_failed",
        }
    }
}
