//! Per-persona daily counter records, one store per stream.
//!
//! Records are keyed `{date}:{persona}` inside the stream's stats
//! partition and carried in an envelope with an expiry stamp. Retention
//! is a rolling window: every write pushes `expires_at` out by the
//! configured number of days, and expired envelopes are skipped and
//! purged lazily when a scan or read encounters them — there is no
//! background sweeper.

use crate::storage_trait::{Partition, Result, StorageBackend};
use pulseboard_commons::{CounterRecord, DateKey, PersonaId, Stream};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Stored wrapper around a counter record: the record plus its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope<R> {
    record: R,
    expires_at: i64,
}

/// Daily counter store for one stream, generic over its record type.
pub struct StatsStore<R> {
    backend: Arc<dyn StorageBackend>,
    partition: Partition,
    retention_millis: i64,
    _marker: PhantomData<fn() -> R>,
}

impl<R: CounterRecord> StatsStore<R> {
    pub fn new(backend: Arc<dyn StorageBackend>, stream: Stream, retention_days: u32) -> Self {
        Self {
            backend,
            partition: Partition::new(stream.stats_partition()),
            retention_millis: i64::from(retention_days) * MILLIS_PER_DAY,
            _marker: PhantomData,
        }
    }

    /// Applies one event to the `(date, persona)` record.
    ///
    /// Read-modify-write: reads the current record (synthesizing a zeroed
    /// one if absent or expired), applies the action's counter deltas,
    /// sets `last_activity` to the event's semantic timestamp
    /// unconditionally, updates the display name only when provided
    /// (sticky), and writes the record back with a fresh retention
    /// window. Returns the updated record.
    ///
    /// Not atomic: two concurrent increments for the same key can
    /// interleave and one full-record write wins. Accepted — these are
    /// approximate dashboard counts, not accounting.
    pub fn increment(
        &self,
        date: &DateKey,
        persona: &PersonaId,
        action: R::Action,
        display_name: Option<&str>,
        event_timestamp: i64,
        now_millis: i64,
    ) -> Result<R> {
        let key = record_key(date, persona);
        let mut record = match self.backend.get(&self.partition, &key)? {
            Some(bytes) => {
                let envelope: Envelope<R> = serde_json::from_slice(&bytes)?;
                if envelope.expires_at > now_millis {
                    envelope.record
                } else {
                    R::zero()
                }
            }
            None => R::zero(),
        };

        record.apply(action);
        record.set_last_activity(event_timestamp);
        record.note_display_name(display_name);

        let envelope = Envelope {
            record,
            expires_at: now_millis + self.retention_millis,
        };
        let value = serde_json::to_vec(&envelope)?;
        self.backend.put(&self.partition, &key, &value)?;
        Ok(envelope.record)
    }

    /// The record for `(date, persona)`, if present and not expired.
    pub fn get(&self, date: &DateKey, persona: &PersonaId, now_millis: i64) -> Result<Option<R>> {
        let key = record_key(date, persona);
        match self.backend.get(&self.partition, &key)? {
            Some(bytes) => {
                let envelope: Envelope<R> = serde_json::from_slice(&bytes)?;
                if envelope.expires_at > now_millis {
                    Ok(Some(envelope.record))
                } else {
                    // Lazy purge; losing the race to another purge is fine.
                    self.backend.delete(&self.partition, &key)?;
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }

    /// Every persona with a live record for `date`, as an unordered
    /// mapping. Expired envelopes encountered during the scan are purged.
    pub fn all_for_date(&self, date: &DateKey, now_millis: i64) -> Result<HashMap<PersonaId, R>> {
        let prefix = date.scan_prefix();
        let entries: Vec<(Vec<u8>, Vec<u8>)> = self
            .backend
            .scan(&self.partition, Some(&prefix), None)?
            .collect();

        let mut records = HashMap::new();
        for (key, value) in entries {
            let envelope: Envelope<R> = serde_json::from_slice(&value)?;
            if envelope.expires_at <= now_millis {
                self.backend.delete(&self.partition, &key)?;
                continue;
            }
            // Persona id is whatever follows the "{date}:" prefix; ids
            // are never validated, so take the suffix as-is.
            let suffix = &key[prefix.len()..];
            let persona = PersonaId::new(String::from_utf8_lossy(suffix).into_owned());
            records.insert(persona, envelope.record);
        }
        Ok(records)
    }

    /// Deletes every record for `date`; returns the number removed.
    pub fn clear_date(&self, date: &DateKey) -> Result<usize> {
        self.backend
            .delete_prefix(&self.partition, Some(&date.scan_prefix()))
    }
}

fn record_key(date: &DateKey, persona: &PersonaId) -> Vec<u8> {
    format!("{}:{}", date, persona).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use chrono::NaiveDate;
    use pulseboard_commons::{PostAction, PostStats, WarmupAction, WarmupStats};

    const DAY: i64 = MILLIS_PER_DAY;

    fn date() -> DateKey {
        DateKey::new(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap())
    }

    fn warmup_store() -> StatsStore<WarmupStats> {
        let backend = Arc::new(InMemoryBackend::with_dashboard_partitions());
        StatsStore::new(backend, Stream::Warmup, 7)
    }

    fn post_store() -> StatsStore<PostStats> {
        let backend = Arc::new(InMemoryBackend::with_dashboard_partitions());
        StatsStore::new(backend, Stream::Posts, 7)
    }

    #[test]
    fn test_increment_folds_the_delta_table_in_order() {
        let store = warmup_store();
        let persona = PersonaId::new("green");

        for i in 0..3 {
            store
                .increment(&date(), &persona, WarmupAction::Like, None, 100 + i, 1_000)
                .unwrap();
        }
        let record = store
            .increment(&date(), &persona, WarmupAction::Bookmark, None, 200, 1_000)
            .unwrap();

        assert_eq!(record.likes, 3);
        assert_eq!(record.bookmarks, 1);
        assert_eq!(record.searches, 0);
        assert_eq!(record.last_activity, 200);
    }

    #[test]
    fn test_non_counting_action_still_refreshes_last_activity() {
        let store = warmup_store();
        let persona = PersonaId::new("green");

        store
            .increment(&date(), &persona, WarmupAction::Like, None, 10, 1_000)
            .unwrap();
        let record = store
            .increment(&date(), &persona, WarmupAction::Scroll, None, 99, 1_000)
            .unwrap();

        assert_eq!(record.likes, 1);
        assert_eq!(record.total(), 1);
        assert_eq!(record.last_activity, 99);
    }

    #[test]
    fn test_post_scheduled_decrement_floors_at_zero() {
        let store = post_store();
        let persona = PersonaId::new("blue");

        store
            .increment(&date(), &persona, PostAction::PostScheduled, None, 1, 1_000)
            .unwrap();
        let record = store
            .increment(&date(), &persona, PostAction::PostPublished, None, 2, 1_000)
            .unwrap();
        assert_eq!((record.scheduled, record.posted, record.failed), (0, 1, 0));

        // Terminal event with nothing outstanding: floor prevents
        // underflow for a fresh persona too.
        let orphan = PersonaId::new("orphan");
        let record = store
            .increment(&date(), &orphan, PostAction::PostPublished, None, 3, 1_000)
            .unwrap();
        assert_eq!((record.scheduled, record.posted, record.failed), (0, 1, 0));
    }

    #[test]
    fn test_display_name_is_sticky_across_writes() {
        let store = warmup_store();
        let persona = PersonaId::new("green");

        store
            .increment(&date(), &persona, WarmupAction::Like, Some("Green"), 1, 1_000)
            .unwrap();
        let record = store
            .increment(&date(), &persona, WarmupAction::Like, None, 2, 1_000)
            .unwrap();

        assert_eq!(record.display_name.as_deref(), Some("Green"));
    }

    #[test]
    fn test_records_are_isolated_per_date_and_persona() {
        let store = warmup_store();
        let other_date = DateKey::new(NaiveDate::from_ymd_opt(2026, 8, 29).unwrap());

        store
            .increment(&date(), &PersonaId::new("a"), WarmupAction::Like, None, 1, 1_000)
            .unwrap();
        store
            .increment(&other_date, &PersonaId::new("a"), WarmupAction::Like, None, 1, 1_000)
            .unwrap();
        store
            .increment(&date(), &PersonaId::new("b"), WarmupAction::Search, None, 2, 1_000)
            .unwrap();

        let today = store.all_for_date(&date(), 1_000).unwrap();
        assert_eq!(today.len(), 2);
        assert_eq!(today[&PersonaId::new("a")].likes, 1);
        assert_eq!(today[&PersonaId::new("b")].searches, 1);
    }

    #[test]
    fn test_expired_record_is_invisible_and_purged() {
        let store = warmup_store();
        let persona = PersonaId::new("green");

        store
            .increment(&date(), &persona, WarmupAction::Like, None, 1, 1_000)
            .unwrap();

        let after_expiry = 1_000 + 7 * DAY;
        assert!(store.get(&date(), &persona, after_expiry).unwrap().is_none());
        assert!(store.all_for_date(&date(), after_expiry).unwrap().is_empty());

        // A new increment after expiry starts from zero.
        let record = store
            .increment(&date(), &persona, WarmupAction::Like, None, 2, after_expiry)
            .unwrap();
        assert_eq!(record.likes, 1);
    }

    #[test]
    fn test_each_write_extends_retention() {
        let store = warmup_store();
        let persona = PersonaId::new("green");

        store
            .increment(&date(), &persona, WarmupAction::Like, None, 1, 0)
            .unwrap();
        // A write on day 5 pushes expiry to day 12.
        store
            .increment(&date(), &persona, WarmupAction::Like, None, 2, 5 * DAY)
            .unwrap();

        let record = store.get(&date(), &persona, 10 * DAY).unwrap();
        assert_eq!(record.unwrap().likes, 2);
    }

    #[test]
    fn test_clear_date_removes_only_that_date() {
        let store = warmup_store();
        let other_date = DateKey::new(NaiveDate::from_ymd_opt(2026, 8, 29).unwrap());

        store
            .increment(&date(), &PersonaId::new("a"), WarmupAction::Like, None, 1, 1_000)
            .unwrap();
        store
            .increment(&date(), &PersonaId::new("b"), WarmupAction::Like, None, 1, 1_000)
            .unwrap();
        store
            .increment(&other_date, &PersonaId::new("a"), WarmupAction::Like, None, 1, 1_000)
            .unwrap();

        assert_eq!(store.clear_date(&date()).unwrap(), 2);
        assert!(store.all_for_date(&date(), 1_000).unwrap().is_empty());
        assert_eq!(store.all_for_date(&other_date, 1_000).unwrap().len(), 1);
    }
}
