//! Per-stream application state shared with the HTTP handlers.

use pulseboard_commons::{
    PostAction, PostDetails, PostStats, WarmupAction, WarmupDetails, WarmupStats,
};
use pulseboard_core::{IngestionService, QueryService};
use std::sync::Arc;

/// The services one stream's endpoints operate on.
///
/// Built once at startup by the server's bootstrap and registered as
/// `web::Data`; the two concrete aliases are distinct types, so warmup
/// handlers can never be handed the posts state by accident.
pub struct StreamState<A, D, R> {
    pub ingestion: Arc<IngestionService<A, D, R>>,
    pub query: Arc<QueryService<A, D, R>>,
}

pub type WarmupState = StreamState<WarmupAction, WarmupDetails, WarmupStats>;
pub type PostsState = StreamState<PostAction, PostDetails, PostStats>;
