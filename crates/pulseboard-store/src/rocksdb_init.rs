//! RocksDB initialization for the dashboard.
//!
//! Thin helper to open (or create) the database with every stream's
//! event-log and counter partitions present as column families.

use anyhow::Result;
use pulseboard_commons::Stream;
use rocksdb::{ColumnFamilyDescriptor, Options, DB};
use std::path::Path;
use std::sync::Arc;

/// Opens the dashboard database, ensuring the four stream partitions
/// (`{warmup,posts}_{events,stats}`) exist.
pub fn open_dashboard_db(path: &Path) -> Result<Arc<DB>> {
    let mut db_opts = Options::default();
    db_opts.create_if_missing(true);
    db_opts.create_missing_column_families(true);

    // Existing CFs (or just "default" on first open), unioned with the
    // partitions the dashboard requires.
    let mut cf_names = match DB::list_cf(&db_opts, path) {
        Ok(cfs) if !cfs.is_empty() => cfs,
        _ => vec!["default".to_string()],
    };

    for stream in Stream::all() {
        for name in [stream.events_partition(), stream.stats_partition()] {
            if !cf_names.iter().any(|n| n == name) {
                cf_names.push(name.to_string());
            }
        }
    }

    let descriptors: Vec<ColumnFamilyDescriptor> = cf_names
        .into_iter()
        .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
        .collect();

    let db = DB::open_cf_descriptors(&db_opts, path, descriptors)?;
    Ok(Arc::new(db))
}
