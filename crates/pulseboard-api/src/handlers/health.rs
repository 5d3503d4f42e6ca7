//! Liveness probe.

use crate::models::HealthResponse;
use actix_web::HttpResponse;

/// Always 200 while the process is serving; does not touch storage.
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}
