//! Error taxonomy for the ingestion path.

use pulseboard_commons::ValidationError;
use pulseboard_store::StorageError;
use thiserror::Error;

/// Why a submitted event was not ingested.
///
/// Validation failures are the producer's problem (400-class, terminal);
/// storage failures mean the backend is unreachable (500-class, the
/// caller owns any retry policy — the core never retries internally).
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("backend unavailable: {0}")]
    Storage(#[from] StorageError),
}
