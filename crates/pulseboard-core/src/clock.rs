//! Time source abstraction.
//!
//! Arrival stamps and date keys come from an injected clock so tests can
//! pin time. Production uses `SystemClock`; `ManualClock` is for tests
//! across the workspace.

use chrono::Utc;
use pulseboard_commons::DateKey;
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    /// Current instant, epoch millis. Used for `received_at` stamps and
    /// retention windows.
    fn now_millis(&self) -> i64;

    /// Current server-local calendar date. Keys today's counters.
    fn today(&self) -> DateKey;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> DateKey {
        DateKey::today()
    }
}

/// A settable clock for tests.
pub struct ManualClock {
    millis: AtomicI64,
    date: DateKey,
}

impl ManualClock {
    pub fn new(millis: i64, date: DateKey) -> Self {
        Self {
            millis: AtomicI64::new(millis),
            date,
        }
    }

    pub fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, by_millis: i64) {
        self.millis.fetch_add(by_millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }

    fn today(&self) -> DateKey {
        self.date
    }
}
