//! Stream-generic handler bodies.
//!
//! The warmup and posts endpoints are the same three operations over
//! different type parameters, so the real logic lives here once and the
//! per-stream modules stay thin. Store access is synchronous RocksDB
//! work, so every call runs on the blocking pool.

use crate::models::{ClearResponse, ErrorBody, SubmitEventRequest, SubmitResponse};
use crate::state::StreamState;
use actix_web::{web, HttpResponse};
use pulseboard_commons::{CounterRecord, StreamAction};
use pulseboard_core::IngestError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub async fn submit<A, D, R>(
    state: &StreamState<A, D, R>,
    request: SubmitEventRequest<D>,
) -> HttpResponse
where
    A: StreamAction,
    D: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
    R: CounterRecord<Action = A>,
{
    let ingestion = Arc::clone(&state.ingestion);
    match web::block(move || ingestion.submit(request.into())).await {
        Ok(Ok(event)) => HttpResponse::Ok().json(SubmitResponse::ok(event)),
        Ok(Err(IngestError::Validation(e))) => {
            log::warn!("rejected event: {}", e);
            HttpResponse::BadRequest().json(ErrorBody::validation(&e))
        }
        Ok(Err(IngestError::Storage(e))) => {
            log::error!("event ingestion failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::backend_unavailable())
        }
        Err(e) => {
            log::error!("blocking pool failure during ingestion: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::backend_unavailable())
        }
    }
}

pub async fn today<A, D, R>(state: &StreamState<A, D, R>) -> HttpResponse
where
    A: StreamAction,
    D: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
    R: CounterRecord<Action = A>,
{
    let query = Arc::clone(&state.query);
    match web::block(move || query.today()).await {
        Ok(Ok(snapshot)) => HttpResponse::Ok().json(snapshot),
        Ok(Err(e)) => {
            log::error!("snapshot query failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::backend_unavailable())
        }
        Err(e) => {
            log::error!("blocking pool failure during query: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::backend_unavailable())
        }
    }
}

pub async fn clear<A, D, R>(state: &StreamState<A, D, R>) -> HttpResponse
where
    A: StreamAction,
    D: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
    R: CounterRecord<Action = A>,
{
    let ingestion = Arc::clone(&state.ingestion);
    match web::block(move || ingestion.clear_today()).await {
        Ok(Ok(removed)) => HttpResponse::Ok().json(ClearResponse { removed }),
        Ok(Err(e)) => {
            log::error!("clear failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::backend_unavailable())
        }
        Err(e) => {
            log::error!("blocking pool failure during clear: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::backend_unavailable())
        }
    }
}
