//! The read path: "today" snapshot composition.

use crate::clock::Clock;
use crate::personas::PersonaDirectory;
use pulseboard_commons::{
    CounterRecord, DateKey, Event, PersonaId, PostAction, PostDetails, PostStats, WarmupAction,
    WarmupDetails, WarmupStats,
};
use pulseboard_store::{EventLogStore, StatsStore, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// One persona's row in the snapshot: identity, display metadata, and
/// today's counters (flattened into the same JSON object).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaSummary<R> {
    pub id: PersonaId,
    pub label: String,
    pub emoji: String,
    #[serde(flatten)]
    pub stats: R,
}

/// The composed response for one stream's "today" query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<A, D, R> {
    /// Server-local calendar date the snapshot covers.
    pub date: DateKey,
    /// Field-wise sum of every persona's counters.
    pub totals: R,
    /// Personas ordered by total activity descending; ties keep the
    /// store's enumeration order (which is unspecified).
    pub personas: Vec<PersonaSummary<R>>,
    /// Most recent raw events, newest first in log insertion order.
    pub recent: Vec<Event<A, D>>,
}

/// Read-only query service for one stream. Side-effect free apart from
/// the stats store's lazy expiry purge.
pub struct QueryService<A, D, R> {
    events: Arc<EventLogStore<Event<A, D>>>,
    stats: Arc<StatsStore<R>>,
    directory: Arc<PersonaDirectory>,
    clock: Arc<dyn Clock>,
    recent_limit: usize,
}

pub type WarmupQuery = QueryService<WarmupAction, WarmupDetails, WarmupStats>;
pub type PostsQuery = QueryService<PostAction, PostDetails, PostStats>;

impl<A, D, R> QueryService<A, D, R>
where
    A: Copy + Serialize + DeserializeOwned + Send + Sync + 'static,
    D: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
    R: CounterRecord,
{
    pub fn new(
        events: Arc<EventLogStore<Event<A, D>>>,
        stats: Arc<StatsStore<R>>,
        directory: Arc<PersonaDirectory>,
        clock: Arc<dyn Clock>,
        recent_limit: usize,
    ) -> Self {
        Self {
            events,
            stats,
            directory,
            clock,
            recent_limit,
        }
    }

    /// Today's totals, per-persona summaries, and recent raw events.
    ///
    /// Counters and events are read in two independent round-trips; a
    /// write landing between them can make the pair momentarily
    /// inconsistent. Tolerated, never surfaced.
    pub fn today(&self) -> Result<Snapshot<A, D, R>, StorageError> {
        let date = self.clock.today();
        let now = self.clock.now_millis();

        let records = self.stats.all_for_date(&date, now)?;

        let mut totals = R::zero();
        let mut personas: Vec<PersonaSummary<R>> = Vec::with_capacity(records.len());
        for (id, stats) in records {
            totals.merge(&stats);
            let meta = self.directory.lookup(&id);
            personas.push(PersonaSummary {
                id,
                label: meta.label,
                emoji: meta.emoji,
                stats,
            });
        }
        // Stable sort: equal totals keep enumeration order.
        personas.sort_by(|a, b| b.stats.total().cmp(&a.stats.total()));

        let recent = self
            .events
            .recent(self.recent_limit)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Snapshot {
            date,
            totals,
            personas,
            recent,
        })
    }
}
