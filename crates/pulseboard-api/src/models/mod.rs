//! Wire models for the HTTP API.

mod event_request;
mod responses;

pub use event_request::SubmitEventRequest;
pub use responses::{ClearResponse, ErrorBody, HealthResponse, SubmitResponse};
