//! Bounded, append-only event log, one per stream.
//!
//! Entries are keyed so a plain forward scan yields newest-first
//! insertion order: the key is `(u64::MAX - received_at_millis)` followed
//! by `(u64::MAX - seq)`, both big-endian, where `seq` is a process-local
//! monotonic counter. The inverted sequence keeps insertion order for
//! events that land in the same millisecond. The semantic `timestamp`
//! field never participates in ordering — callers wanting a time-sorted
//! view sort client-side.

use crate::storage_trait::{Partition, Result, StorageBackend};
use pulseboard_commons::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Append-only bounded log of raw events for one stream.
pub struct EventLogStore<E> {
    backend: Arc<dyn StorageBackend>,
    partition: Partition,
    cap: usize,
    seq: AtomicU64,
    _marker: PhantomData<fn() -> E>,
}

impl<E> EventLogStore<E>
where
    E: Serialize + DeserializeOwned,
{
    /// Creates the log for `stream`, bound to its events partition and
    /// fixed cap (500 warmup / 200 posts).
    pub fn new(backend: Arc<dyn StorageBackend>, stream: Stream) -> Self {
        Self {
            backend,
            partition: Partition::new(stream.events_partition()),
            cap: stream.log_cap(),
            seq: AtomicU64::new(0),
            _marker: PhantomData,
        }
    }

    /// Appends an event as the most-recent entry, then trims the log to
    /// its cap by dropping the oldest entries.
    ///
    /// The append and the trim are separate backend operations; an
    /// interleaved duplicate trim causes no corruption, only a possible
    /// off-by-a-few overrun of the cap under heavy concurrent bursts.
    pub fn append(&self, received_at_millis: i64, event: &E) -> Result<()> {
        let key = self.entry_key(received_at_millis);
        let value = serde_json::to_vec(event)?;
        self.backend.put(&self.partition, &key, &value)?;
        self.trim()
    }

    /// The `limit` most-recently-appended entries, newest first, as a
    /// lazy iterator. Returns fewer if the log is shorter. Repeated
    /// calls are independent reads, not a cursor.
    pub fn recent(&self, limit: usize) -> Result<impl Iterator<Item = Result<E>> + '_> {
        let iter = self.backend.scan(&self.partition, None, Some(limit))?;
        Ok(iter.map(|(_, value)| serde_json::from_slice(&value).map_err(Into::into)))
    }

    /// Deletes every entry; returns the number removed.
    pub fn clear(&self) -> Result<usize> {
        self.backend.delete_prefix(&self.partition, None)
    }

    /// Current entry count. Intended for tests and diagnostics.
    pub fn len(&self) -> Result<usize> {
        Ok(self.backend.scan(&self.partition, None, None)?.count())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn entry_key(&self, received_at_millis: i64) -> [u8; 16] {
        let inv_ts = u64::MAX - received_at_millis.max(0) as u64;
        let inv_seq = u64::MAX - self.seq.fetch_add(1, Ordering::SeqCst);

        let mut key = [0u8; 16];
        key[..8].copy_from_slice(&inv_ts.to_be_bytes());
        key[8..].copy_from_slice(&inv_seq.to_be_bytes());
        key
    }

    fn trim(&self) -> Result<()> {
        let overflow: Vec<Vec<u8>> = self
            .backend
            .scan(&self.partition, None, None)?
            .skip(self.cap)
            .map(|(key, _)| key)
            .collect();
        for key in overflow {
            self.backend.delete(&self.partition, &key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use pulseboard_commons::{PersonaId, WarmupAction, WarmupEvent};

    fn event(persona: &str, received_at: i64) -> WarmupEvent {
        WarmupEvent {
            timestamp: received_at,
            received_at,
            persona_id: PersonaId::new(persona),
            action: WarmupAction::Like,
            details: None,
            display_name: None,
        }
    }

    fn log() -> EventLogStore<WarmupEvent> {
        let backend = Arc::new(InMemoryBackend::with_dashboard_partitions());
        EventLogStore::new(backend, Stream::Warmup)
    }

    #[test]
    fn test_recent_is_newest_first_insertion_order() {
        let log = log();
        log.append(100, &event("a", 100)).unwrap();
        log.append(200, &event("b", 200)).unwrap();
        log.append(300, &event("c", 300)).unwrap();

        let recent: Vec<WarmupEvent> = log
            .recent(10)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.persona_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_same_millisecond_keeps_insertion_order() {
        let log = log();
        log.append(500, &event("first", 500)).unwrap();
        log.append(500, &event("second", 500)).unwrap();

        let recent: Vec<WarmupEvent> = log.recent(2).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(recent[0].persona_id.as_str(), "second");
        assert_eq!(recent[1].persona_id.as_str(), "first");
    }

    #[test]
    fn test_submitted_event_is_within_recent_limit() {
        let log = log();
        log.append(1, &event("target", 1)).unwrap();
        // Fewer than limit-1 appends afterwards.
        log.append(2, &event("x", 2)).unwrap();
        log.append(3, &event("y", 3)).unwrap();

        let recent: Vec<WarmupEvent> = log.recent(5).unwrap().collect::<Result<_>>().unwrap();
        assert!(recent.iter().any(|e| e.persona_id.as_str() == "target"));
    }

    #[test]
    fn test_recent_returns_fewer_when_log_is_short() {
        let log = log();
        log.append(1, &event("only", 1)).unwrap();

        let recent: Vec<WarmupEvent> = log.recent(50).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(recent.len(), 1);
    }

    #[test]
    fn test_never_grows_beyond_cap() {
        let backend = Arc::new(InMemoryBackend::with_dashboard_partitions());
        let log: EventLogStore<WarmupEvent> = EventLogStore::new(backend, Stream::Posts);
        let cap = Stream::Posts.log_cap();

        for i in 0..(cap as i64 + 75) {
            log.append(i, &event("burst", i)).unwrap();
            assert!(log.len().unwrap() <= cap);
        }
        assert_eq!(log.len().unwrap(), cap);

        // Oldest entries were the ones dropped.
        let recent: Vec<WarmupEvent> = log.recent(cap).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(recent.first().unwrap().received_at, cap as i64 + 74);
        assert_eq!(recent.last().unwrap().received_at, 75);
    }

    #[test]
    fn test_clear_empties_the_log_and_reports_count() {
        let log = log();
        for i in 0..4 {
            log.append(i, &event("p", i)).unwrap();
        }

        assert_eq!(log.clear().unwrap(), 4);
        assert!(log.is_empty().unwrap());
        assert_eq!(log.recent(10).unwrap().count(), 0);
    }

    #[test]
    fn test_duplicate_appends_are_not_deduplicated() {
        let log = log();
        let e = event("dup", 42);
        log.append(42, &e).unwrap();
        log.append(42, &e).unwrap();

        assert_eq!(log.len().unwrap(), 2);
    }
}
