//! # pulseboard-store
//!
//! Storage layer for the Pulseboard dashboard. Isolates all direct
//! key-value interactions behind the `StorageBackend` trait so the
//! business logic in `pulseboard-core` stays free of engine specifics.
//!
//! ## Architecture
//!
//! ```text
//! pulseboard-core (ingestion / query services)
//!     ↓
//! EventLogStore / StatsStore   ← typed, per-stream stores (this crate)
//!     ↓
//! StorageBackend               ← generic K/V operations
//!     ↓
//! RocksDB | in-memory          ← concrete engines
//! ```
//!
//! ## Collections
//!
//! Each stream owns two partitions:
//!
//! - `{stream}_events`: the bounded event log, keyed so a forward scan
//!   yields newest-first insertion order.
//! - `{stream}_stats`: per-day counter records keyed `{date}:{persona}`,
//!   carried in an envelope with a 7-day expiry stamp.
//!
//! The two collections are deliberately decoupled: there is no
//! transactional coupling between a log append and its counter
//! increment, and counters are treated as a rebuildable cache of the log.

pub mod event_log;
pub mod memory;
pub mod rocksdb_impl;
pub mod rocksdb_init;
pub mod stats_store;
pub mod storage_trait;

pub use event_log::EventLogStore;
pub use memory::InMemoryBackend;
pub use rocksdb_impl::RocksDbBackend;
pub use rocksdb_init::open_dashboard_db;
pub use stats_store::StatsStore;
pub use storage_trait::{Partition, StorageBackend, StorageError};
