//! Per-persona daily counter records and their fold rules.
//!
//! A counter record is a derived, best-effort aggregate of the event log:
//! losing an increment never corrupts the log, and the record could in
//! principle be rebuilt by refolding the day's events.

use super::{PostAction, StreamAction, WarmupAction};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Behavior shared by the per-stream counter record types.
///
/// `apply` is the action→delta table; `merge` is used by the query layer
/// to compute totals across personas.
pub trait CounterRecord:
    Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Action: StreamAction;

    /// A record with every counter at zero.
    fn zero() -> Self;

    /// Applies one action's counter deltas. Actions outside the delta
    /// table leave every counter untouched (the caller still refreshes
    /// `last_activity`).
    fn apply(&mut self, action: Self::Action);

    /// Sum of all counters, used for activity-descending ordering.
    fn total(&self) -> u64;

    /// Field-wise sum of counters into `self`. `last_activity` takes the
    /// max of the two records; `display_name` is left alone (it has no
    /// meaning on a totals record).
    fn merge(&mut self, other: &Self);

    fn last_activity(&self) -> i64;

    fn set_last_activity(&mut self, at: i64);

    fn display_name(&self) -> Option<&str>;

    /// Sticky update: a non-empty name replaces the stored one, `None`
    /// or empty leaves the last-known value in place.
    fn note_display_name(&mut self, name: Option<&str>);
}

/// Daily warmup activity counters for one persona.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmupStats {
    pub likes: u64,
    pub bookmarks: u64,
    pub searches: u64,
    pub explores: u64,
    pub videos: u64,
    pub sessions: u64,

    /// Timestamp of the most recently processed event, epoch millis.
    /// Last write wins, no compare-and-swap.
    pub last_activity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl CounterRecord for WarmupStats {
    type Action = WarmupAction;

    fn zero() -> Self {
        Self::default()
    }

    fn apply(&mut self, action: WarmupAction) {
        match action {
            WarmupAction::Like => self.likes += 1,
            WarmupAction::Bookmark => self.bookmarks += 1,
            WarmupAction::Search => self.searches += 1,
            WarmupAction::Explore => self.explores += 1,
            WarmupAction::VideoWatch => self.videos += 1,
            WarmupAction::SessionStart => self.sessions += 1,
            // No counter, but the event still counts as activity.
            WarmupAction::SessionEnd
            | WarmupAction::Error
            | WarmupAction::Scroll
            | WarmupAction::ProfileVisit => {}
        }
    }

    fn total(&self) -> u64 {
        self.likes + self.bookmarks + self.searches + self.explores + self.videos + self.sessions
    }

    fn merge(&mut self, other: &Self) {
        self.likes += other.likes;
        self.bookmarks += other.bookmarks;
        self.searches += other.searches;
        self.explores += other.explores;
        self.videos += other.videos;
        self.sessions += other.sessions;
        self.last_activity = self.last_activity.max(other.last_activity);
    }

    fn last_activity(&self) -> i64 {
        self.last_activity
    }

    fn set_last_activity(&mut self, at: i64) {
        self.last_activity = at;
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn note_display_name(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            if !name.is_empty() {
                self.display_name = Some(name.to_string());
            }
        }
    }
}

/// Daily scheduled-post lifecycle counters for one persona.
///
/// `scheduled` means "currently outstanding", not "ever scheduled": a
/// terminal event (`post_published` / `post_failed`) decrements it,
/// floored at zero. That conflation is intentional and pinned by tests;
/// do not "fix" it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    pub scheduled: u64,
    pub posted: u64,
    pub failed: u64,

    /// Timestamp of the most recently processed event, epoch millis.
    pub last_activity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl CounterRecord for PostStats {
    type Action = PostAction;

    fn zero() -> Self {
        Self::default()
    }

    fn apply(&mut self, action: PostAction) {
        match action {
            PostAction::PostScheduled => self.scheduled += 1,
            PostAction::PostPublished => {
                self.posted += 1;
                self.scheduled = self.scheduled.saturating_sub(1);
            }
            PostAction::PostFailed => {
                self.failed += 1;
                self.scheduled = self.scheduled.saturating_sub(1);
            }
        }
    }

    fn total(&self) -> u64 {
        self.scheduled + self.posted + self.failed
    }

    fn merge(&mut self, other: &Self) {
        self.scheduled += other.scheduled;
        self.posted += other.posted;
        self.failed += other.failed;
        self.last_activity = self.last_activity.max(other.last_activity);
    }

    fn last_activity(&self) -> i64 {
        self.last_activity
    }

    fn set_last_activity(&mut self, at: i64) {
        self.last_activity = at;
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn note_display_name(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            if !name.is_empty() {
                self.display_name = Some(name.to_string());
            }
        }
    }
}
