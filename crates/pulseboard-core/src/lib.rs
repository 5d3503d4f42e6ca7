//! # pulseboard-core
//!
//! Business logic for the Pulseboard dashboard: the sole write path
//! (validate → stamp → append → increment) and the read path that
//! composes "today" snapshots for the polling front end.
//!
//! Both services hold injected store handles and an injected clock —
//! nothing here owns a connection or initializes state at first use.

pub mod clock;
pub mod errors;
pub mod ingest;
pub mod personas;
pub mod query;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::IngestError;
pub use ingest::{EventDraft, IngestionService, PostsIngestion, WarmupIngestion};
pub use personas::{PersonaDirectory, PersonaMeta};
pub use query::{PersonaSummary, PostsQuery, QueryService, Snapshot, WarmupQuery};
