//! Scheduled-posts stream endpoints.

use super::shared;
use crate::models::SubmitEventRequest;
use crate::state::PostsState;
use actix_web::{web, HttpResponse};
use pulseboard_commons::PostDetails;

pub async fn submit_event(
    state: web::Data<PostsState>,
    body: web::Json<SubmitEventRequest<PostDetails>>,
) -> HttpResponse {
    shared::submit(&state, body.into_inner()).await
}

pub async fn today(state: web::Data<PostsState>) -> HttpResponse {
    shared::today(&state).await
}

pub async fn clear(state: web::Data<PostsState>) -> HttpResponse {
    shared::clear(&state).await
}
