//! RocksDB implementation of the StorageBackend trait.
//!
//! Maps partitions to RocksDB column families. Scans bind a database
//! snapshot for the duration of the iterator so a concurrent trim or
//! clear cannot shift a reader mid-scan.

use crate::storage_trait::{Partition, Result, StorageBackend, StorageError};
use rocksdb::{ColumnFamily, Direction, IteratorMode, Options, DB};
use std::sync::Arc;

/// RocksDB-backed storage engine.
pub struct RocksDbBackend {
    db: Arc<DB>,
}

impl RocksDbBackend {
    /// Creates a new backend over an already-opened database handle.
    /// Use `open_dashboard_db` to open one with the stream partitions
    /// precreated.
    pub fn new(db: Arc<DB>) -> Self {
        Self { db }
    }

    fn get_cf(&self, partition: &Partition) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))
    }
}

impl StorageBackend for RocksDbBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let cf = self.get_cf(partition)?;
        self.db
            .get_cf(cf, key)
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let cf = self.get_cf(partition)?;
        self.db
            .put_cf(cf, key, value)
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let cf = self.get_cf(partition)?;
        self.db
            .delete_cf(cf, key)
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + '_>> {
        let cf = self.get_cf(partition)?;

        // Consistent snapshot for the duration of the iterator.
        let snapshot = self.db.snapshot();

        let prefix_vec = prefix.map(|p| p.to_vec());
        let iter_mode = match &prefix_vec {
            Some(p) => IteratorMode::From(p.as_slice(), Direction::Forward),
            None => IteratorMode::Start,
        };

        let mut readopts = rocksdb::ReadOptions::default();
        readopts.set_snapshot(&snapshot);
        let inner = self.db.iterator_cf_opt(cf, readopts, iter_mode);

        struct SnapshotScanIter<'a, D: rocksdb::DBAccess> {
            // Held to keep the snapshot alive for 'a.
            _snapshot: rocksdb::SnapshotWithThreadMode<'a, D>,
            inner: rocksdb::DBIteratorWithThreadMode<'a, D>,
            prefix: Option<Vec<u8>>,
            remaining: Option<usize>,
        }

        impl<'a, D: rocksdb::DBAccess> Iterator for SnapshotScanIter<'a, D> {
            type Item = (Vec<u8>, Vec<u8>);

            fn next(&mut self) -> Option<Self::Item> {
                if let Some(0) = self.remaining {
                    return None;
                }
                match self.inner.next()? {
                    Ok((k, v)) => {
                        if let Some(ref p) = self.prefix {
                            if !k.starts_with(p) {
                                return None;
                            }
                        }
                        if let Some(ref mut left) = self.remaining {
                            *left -= 1;
                        }
                        Some((k.to_vec(), v.to_vec()))
                    }
                    Err(_) => None,
                }
            }
        }

        Ok(Box::new(SnapshotScanIter::<DB> {
            _snapshot: snapshot,
            inner,
            prefix: prefix_vec,
            remaining: limit,
        }))
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.db.cf_handle(partition.name()).is_some()
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        if self.partition_exists(partition) {
            return Ok(());
        }

        let opts = Options::default();
        unsafe {
            // SAFETY: create_cf is thread-safe and no column family
            // handles are held across this call; the Arc keeps the DB
            // alive for its duration.
            let db_ptr = Arc::as_ptr(&self.db) as *mut DB;
            match (*db_ptr).create_cf(partition.name(), &opts) {
                Ok(()) => {}
                Err(e) => {
                    let msg = e.to_string();
                    // Benign race: another thread created the CF between
                    // the exists-check and create.
                    if msg.to_lowercase().contains("column family already exists") {
                        return Ok(());
                    }
                    return Err(StorageError::Io(msg));
                }
            }
        }

        Ok(())
    }
}
