//! Route table. The two streams expose identical shapes under their own
//! path segments; everything lives under the `/v1` version scope.

use crate::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .service(
                web::scope("/warmup")
                    .route("/events", web::post().to(handlers::warmup::submit_event))
                    .route("/today", web::get().to(handlers::warmup::today))
                    .route("/clear", web::post().to(handlers::warmup::clear)),
            )
            .service(
                web::scope("/posts")
                    .route("/events", web::post().to(handlers::posts::submit_event))
                    .route("/today", web::get().to(handlers::posts::today))
                    .route("/clear", web::post().to(handlers::posts::clear)),
            )
            .route("/healthz", web::get().to(handlers::health::healthz)),
    );
}
