//! Storage backend abstraction for pluggable storage implementations.
//!
//! The dashboard talks to a single shared key-value backend. This trait
//! pins down the handful of operations it actually needs — point reads
//! and writes, ordered prefix scans, and prefix deletion — so that the
//! production RocksDB engine and the in-memory test engine are
//! interchangeable behind one seam.
//!
//! ## Partition model
//!
//! Data is organized into named partitions. Backends map the concept to
//! their native structure: RocksDB uses a column family per partition,
//! the in-memory backend a map per partition.

use std::fmt;
use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
///
/// Backend failures are surfaced to the caller unchanged; nothing in
/// this crate retries or queues.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Partition (column family, namespace) not found.
    #[error("partition not found: {0}")]
    PartitionNotFound(String),

    /// The backend could not be reached or returned an engine error.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// A stored value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A named logical partition within the storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    name: String,
}

impl Partition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Partition {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Trait for pluggable storage backend implementations.
///
/// Implementations must be thread-safe (`Send + Sync`); the HTTP runtime
/// invokes store operations concurrently and unboundedly. Scans must
/// yield keys in ascending byte order — the typed stores rely on that
/// for both newest-first logs and date-prefixed counter enumeration.
pub trait StorageBackend: Send + Sync {
    /// Retrieves a value by key. `Ok(None)` if the key doesn't exist.
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Stores a key-value pair, replacing any existing value.
    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()>;

    /// Deletes a key. `Ok(())` even if the key doesn't exist (idempotent).
    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()>;

    /// Scans keys in ascending byte order, optionally filtered by prefix
    /// and capped at `limit` entries. The iterator is a lazy, restartable
    /// read — repeated scans are independent, not a shared cursor.
    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + '_>>;

    /// Deletes every key matching `prefix` (all keys when `None`).
    /// Returns the number of keys removed.
    ///
    /// Collect-then-delete; a concurrent writer can slip a key in between
    /// the two steps. Acceptable for the administrative clear this backs.
    fn delete_prefix(&self, partition: &Partition, prefix: Option<&[u8]>) -> Result<usize> {
        let keys: Vec<Vec<u8>> = self
            .scan(partition, prefix, None)?
            .map(|(key, _)| key)
            .collect();
        for key in &keys {
            self.delete(partition, key)?;
        }
        Ok(keys.len())
    }

    /// Checks if a partition exists.
    fn partition_exists(&self, partition: &Partition) -> bool;

    /// Creates a new partition. `Ok(())` if it already exists.
    fn create_partition(&self, partition: &Partition) -> Result<()>;
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_creation() {
        let p = Partition::new("warmup_events");
        assert_eq!(p.name(), "warmup_events");
        assert_eq!(p.to_string(), "warmup_events");

        let q = Partition::from("posts_stats");
        assert_eq!(q.name(), "posts_stats");
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::PartitionNotFound("warmup_events".to_string());
        assert_eq!(err.to_string(), "partition not found: warmup_events");

        let err = StorageError::Io("disk full".to_string());
        assert_eq!(err.to_string(), "storage I/O error: disk full");
    }
}
