//! Warmup stream endpoints.

use super::shared;
use crate::models::SubmitEventRequest;
use crate::state::WarmupState;
use actix_web::{web, HttpResponse};
use pulseboard_commons::WarmupDetails;

pub async fn submit_event(
    state: web::Data<WarmupState>,
    body: web::Json<SubmitEventRequest<WarmupDetails>>,
) -> HttpResponse {
    shared::submit(&state, body.into_inner()).await
}

pub async fn today(state: web::Data<WarmupState>) -> HttpResponse {
    shared::today(&state).await
}

pub async fn clear(state: web::Data<WarmupState>) -> HttpResponse {
    shared::clear(&state).await
}
