//! In-memory implementation of the StorageBackend trait.
//!
//! A `BTreeMap` per partition gives the ascending-key scan the trait
//! promises. Used by unit tests throughout the workspace and available
//! as the `memory` storage backend for dependency-free dev runs.

use crate::storage_trait::{Partition, Result, StorageBackend, StorageError};
use pulseboard_commons::Stream;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

type PartitionMap = BTreeMap<Vec<u8>, Vec<u8>>;

/// Thread-safe in-memory storage engine.
#[derive(Default)]
pub struct InMemoryBackend {
    partitions: RwLock<HashMap<String, PartitionMap>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with every stream's event and stats partition precreated,
    /// mirroring what `open_dashboard_db` does for RocksDB.
    pub fn with_dashboard_partitions() -> Self {
        let backend = Self::new();
        for stream in Stream::all() {
            // Infallible for this engine.
            let _ = backend.create_partition(&Partition::new(stream.events_partition()));
            let _ = backend.create_partition(&Partition::new(stream.stats_partition()));
        }
        backend
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let guard = self
            .partitions
            .read()
            .map_err(|e| StorageError::Io(format!("lock poisoned: {}", e)))?;
        let map = guard
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let mut guard = self
            .partitions
            .write()
            .map_err(|e| StorageError::Io(format!("lock poisoned: {}", e)))?;
        let map = guard
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let mut guard = self
            .partitions
            .write()
            .map_err(|e| StorageError::Io(format!("lock poisoned: {}", e)))?;
        let map = guard
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        map.remove(key);
        Ok(())
    }

    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + '_>> {
        let guard = self
            .partitions
            .read()
            .map_err(|e| StorageError::Io(format!("lock poisoned: {}", e)))?;
        let map = guard
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;

        // Collected under the lock; the iterator itself is an independent
        // point-in-time read, same as the RocksDB snapshot scan.
        let entries: Vec<(Vec<u8>, Vec<u8>)> = match prefix {
            Some(p) => map
                .range(p.to_vec()..)
                .take_while(|(k, _)| k.starts_with(p))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        };

        let iter = entries.into_iter().take(limit.unwrap_or(usize::MAX));
        Ok(Box::new(iter))
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.partitions
            .read()
            .map(|guard| guard.contains_key(partition.name()))
            .unwrap_or(false)
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        let mut guard = self
            .partitions
            .write()
            .map_err(|e| StorageError::Io(format!("lock poisoned: {}", e)))?;
        guard.entry(partition.name().to_string()).or_default();
        Ok(())
    }
}
