//! The sole write path: validate, stamp, append, increment.

use crate::clock::Clock;
use crate::errors::IngestError;
use pulseboard_commons::{
    CounterRecord, Event, PersonaId, PostAction, PostDetails, PostStats, StreamAction,
    ValidationError, WarmupAction, WarmupDetails, WarmupStats,
};
use pulseboard_store::{EventLogStore, StatsStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// A loosely-typed inbound event, as received from a producer.
///
/// Fields are optional because producers are uncontrolled; `submit`
/// turns a draft into an immutable typed `Event` or rejects it.
#[derive(Debug, Clone, Default)]
pub struct EventDraft<D> {
    pub persona_id: Option<String>,
    pub action: Option<String>,
    pub timestamp: Option<i64>,
    pub display_name: Option<String>,
    pub details: Option<D>,
}

/// Write path for one stream.
///
/// Holds injected store handles; constructed once at startup. There is
/// no batching and no transactional coupling between the log append and
/// the counter increment — a crash between the two leaves the event
/// durably logged but not aggregated, which the design accepts.
pub struct IngestionService<A, D, R> {
    events: Arc<EventLogStore<Event<A, D>>>,
    stats: Arc<StatsStore<R>>,
    clock: Arc<dyn Clock>,
}

pub type WarmupIngestion = IngestionService<WarmupAction, WarmupDetails, WarmupStats>;
pub type PostsIngestion = IngestionService<PostAction, PostDetails, PostStats>;

impl<A, D, R> IngestionService<A, D, R>
where
    A: StreamAction,
    D: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
    R: CounterRecord<Action = A>,
{
    pub fn new(
        events: Arc<EventLogStore<Event<A, D>>>,
        stats: Arc<StatsStore<R>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            stats,
            clock,
        }
    }

    /// Validates and ingests one event; returns the stamped event.
    ///
    /// Every submission is processed independently — retried duplicates
    /// count twice, by design. Rejected events touch neither store.
    pub fn submit(&self, draft: EventDraft<D>) -> Result<Event<A, D>, IngestError> {
        let persona_id = draft
            .persona_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ValidationError::missing("personaId"))?;
        let raw_action = draft
            .action
            .filter(|a| !a.is_empty())
            .ok_or_else(|| ValidationError::missing("action"))?;
        let action =
            A::parse(&raw_action).ok_or_else(|| ValidationError::unknown_action(&raw_action))?;

        // Arrival time is ours, unconditionally; the producer's semantic
        // timestamp is kept but never trusted for ordering.
        let now = self.clock.now_millis();
        let event = Event {
            timestamp: draft.timestamp.unwrap_or(now),
            received_at: now,
            persona_id: PersonaId::new(persona_id),
            action,
            details: draft.details,
            display_name: draft.display_name.filter(|name| !name.is_empty()),
        };

        self.events.append(event.received_at, &event)?;
        self.stats.increment(
            &self.clock.today(),
            &event.persona_id,
            event.action,
            event.display_name.as_deref(),
            event.timestamp,
            now,
        )?;

        log::debug!(
            "ingested {} event for persona {}",
            action.as_str(),
            event.persona_id
        );
        Ok(event)
    }

    /// Administrative reset: deletes today's counter records and empties
    /// the stream's event log. Returns the total number of keys removed.
    /// Irreversible; only ever invoked by an explicit operator action.
    pub fn clear_today(&self) -> Result<usize, IngestError> {
        let stats_removed = self.stats.clear_date(&self.clock.today())?;
        let events_removed = self.events.clear()?;
        log::info!(
            "cleared daily state: {} counter records, {} log entries",
            stats_removed,
            events_removed
        );
        Ok(stats_removed + events_removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::NaiveDate;
    use pulseboard_commons::{DateKey, Stream};
    use pulseboard_store::{InMemoryBackend, StorageBackend};

    fn fixture() -> (
        WarmupIngestion,
        Arc<EventLogStore<Event<WarmupAction, WarmupDetails>>>,
        Arc<StatsStore<WarmupStats>>,
        Arc<ManualClock>,
    ) {
        let backend: Arc<dyn StorageBackend> =
            Arc::new(InMemoryBackend::with_dashboard_partitions());
        let events = Arc::new(EventLogStore::new(backend.clone(), Stream::Warmup));
        let stats = Arc::new(StatsStore::new(backend, Stream::Warmup, 7));
        let clock = Arc::new(ManualClock::new(
            1_000,
            DateKey::new(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()),
        ));
        let service = IngestionService::new(events.clone(), stats.clone(), clock.clone());
        (service, events, stats, clock)
    }

    fn draft(persona: &str, action: &str) -> EventDraft<WarmupDetails> {
        EventDraft {
            persona_id: Some(persona.to_string()),
            action: Some(action.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_stamps_received_at_and_defaults_timestamp() {
        let (service, _, _, clock) = fixture();
        clock.set_millis(42_000);

        let event = service.submit(draft("green", "like")).unwrap();
        assert_eq!(event.received_at, 42_000);
        assert_eq!(event.timestamp, 42_000);

        // A client-supplied timestamp is kept, but received_at is still ours.
        let mut with_ts = draft("green", "like");
        with_ts.timestamp = Some(7);
        let event = service.submit(with_ts).unwrap();
        assert_eq!(event.timestamp, 7);
        assert_eq!(event.received_at, 42_000);
    }

    #[test]
    fn test_submit_updates_both_stores() {
        let (service, events, stats, clock) = fixture();

        for _ in 0..3 {
            service.submit(draft("green", "like")).unwrap();
        }
        service.submit(draft("green", "bookmark")).unwrap();

        assert_eq!(events.len().unwrap(), 4);
        let records = stats.all_for_date(&clock.today(), clock.now_millis()).unwrap();
        let record = &records[&PersonaId::new("green")];
        assert_eq!(record.likes, 3);
        assert_eq!(record.bookmarks, 1);
        assert_eq!(record.searches, 0);
    }

    #[test]
    fn test_missing_persona_id_is_rejected() {
        let (service, events, stats, clock) = fixture();

        for bad in [None, Some(String::new())] {
            let result = service.submit(EventDraft {
                persona_id: bad,
                action: Some("like".to_string()),
                ..Default::default()
            });
            match result {
                Err(IngestError::Validation(e)) => assert_eq!(e.field, "personaId"),
                other => panic!("expected validation error, got {:?}", other.map(|_| ())),
            }
        }

        // Rejected events touch neither store.
        assert!(events.is_empty().unwrap());
        assert!(stats
            .all_for_date(&clock.today(), clock.now_millis())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let (service, events, _, _) = fixture();

        let result = service.submit(draft("green", "post_scheduled"));
        match result {
            Err(IngestError::Validation(e)) => {
                assert_eq!(e.field, "action");
                assert!(e.message.contains("post_scheduled"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
        assert!(events.is_empty().unwrap());
    }

    #[test]
    fn test_duplicate_submission_is_not_deduplicated() {
        // A producer retry looks identical to a new event; the system
        // must count it twice. Asserted explicitly so nobody "fixes" it.
        let (service, events, stats, clock) = fixture();
        let mut dup = draft("green", "like");
        dup.timestamp = Some(5);

        service.submit(dup.clone()).unwrap();
        service.submit(dup).unwrap();

        assert_eq!(events.len().unwrap(), 2);
        let records = stats.all_for_date(&clock.today(), clock.now_millis()).unwrap();
        assert_eq!(records[&PersonaId::new("green")].likes, 2);
    }

    #[test]
    fn test_empty_display_name_is_dropped() {
        let (service, _, _, _) = fixture();
        let mut d = draft("green", "like");
        d.display_name = Some(String::new());

        let event = service.submit(d).unwrap();
        assert!(event.display_name.is_none());
    }

    #[test]
    fn test_clear_today_empties_both_stores_and_counts_keys() {
        let (service, events, stats, clock) = fixture();

        service.submit(draft("green", "like")).unwrap();
        service.submit(draft("blue", "search")).unwrap();

        // 2 counter records + 2 log entries.
        assert_eq!(service.clear_today().unwrap(), 4);
        assert!(events.is_empty().unwrap());
        assert!(stats
            .all_for_date(&clock.today(), clock.now_millis())
            .unwrap()
            .is_empty());
    }
}
