//! The two event/counter namespaces served by the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two independent event/counter namespaces.
///
/// Each stream owns two partitions in the storage backend: a bounded
/// event log and a set of per-day counter records. The log caps differ
/// per stream and are fixed by design, not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    /// Social-media warmup activity (likes, bookmarks, searches, ...).
    Warmup,
    /// Scheduled-post lifecycle (scheduled → published/failed).
    Posts,
}

impl Stream {
    /// Key prefix used in partition names and log messages.
    pub fn prefix(&self) -> &'static str {
        match self {
            Stream::Warmup => "warmup",
            Stream::Posts => "posts",
        }
    }

    /// Partition holding this stream's bounded event log.
    pub fn events_partition(&self) -> &'static str {
        match self {
            Stream::Warmup => "warmup_events",
            Stream::Posts => "posts_events",
        }
    }

    /// Partition holding this stream's per-day counter records.
    pub fn stats_partition(&self) -> &'static str {
        match self {
            Stream::Warmup => "warmup_stats",
            Stream::Posts => "posts_stats",
        }
    }

    /// Maximum number of entries retained in the event log.
    pub fn log_cap(&self) -> usize {
        match self {
            Stream::Warmup => 500,
            Stream::Posts => 200,
        }
    }

    /// All streams, for partition bootstrap.
    pub fn all() -> [Stream; 2] {
        [Stream::Warmup, Stream::Posts]
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}
