//! # pulseboard-api
//!
//! HTTP surface of the Pulseboard dashboard: per-stream ingestion,
//! query, and administrative clear endpoints, plus a liveness probe.
//!
//! Handlers are thin adapters: deserialize the wire shape, hand the
//! work to `pulseboard-core` on the blocking pool, map the outcome to a
//! status code. CORS is configured by the server binary, not here.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::configure_routes;
pub use state::{PostsState, StreamState, WarmupState};
