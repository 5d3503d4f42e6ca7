//! # pulseboard-commons
//!
//! Shared domain model for the Pulseboard activity dashboard.
//!
//! Holds the types every layer speaks: stream definitions, typed action
//! enums, persona ids, date keys, event shapes, and the per-day counter
//! records with their fold rules. No storage or HTTP dependencies live
//! here, so both the store and API layers can depend on it freely.

pub mod errors;
pub mod models;

pub use errors::ValidationError;
pub use models::{
    CounterRecord, DateKey, Event, PersonaId, PostAction, PostDetails, PostEvent, PostStats,
    Stream, StreamAction, WarmupAction, WarmupDetails, WarmupEvent, WarmupStats,
};
