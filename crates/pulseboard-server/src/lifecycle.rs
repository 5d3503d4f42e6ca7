//! Server lifecycle helpers.
//!
//! Encapsulates the heavy lifting kept out of `main.rs`: opening the
//! storage backend, wiring the per-stream services, and running the HTTP
//! server.

use crate::config::ServerConfig;
use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use log::info;
use pulseboard_api::{configure_routes, PostsState, StreamState, WarmupState};
use pulseboard_commons::{CounterRecord, Event, Stream, StreamAction};
use pulseboard_core::{Clock, IngestionService, PersonaDirectory, QueryService, SystemClock};
use pulseboard_store::{
    open_dashboard_db, EventLogStore, InMemoryBackend, RocksDbBackend, StatsStore, StorageBackend,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Aggregated application components shared with the HTTP server.
pub struct ApplicationComponents {
    pub warmup: web::Data<WarmupState>,
    pub posts: web::Data<PostsState>,
}

fn open_backend(config: &ServerConfig) -> Result<Arc<dyn StorageBackend>> {
    match config.storage.backend.as_str() {
        "memory" => {
            info!("Using in-memory storage backend (non-persistent)");
            Ok(Arc::new(InMemoryBackend::with_dashboard_partitions()))
        }
        _ => {
            let db_path = std::path::PathBuf::from(&config.storage.db_path);
            std::fs::create_dir_all(&db_path)?;
            let db = open_dashboard_db(&db_path)?;
            info!("RocksDB initialized at {}", db_path.display());
            Ok(Arc::new(RocksDbBackend::new(db)))
        }
    }
}

fn build_stream_state<A, D, R>(
    backend: Arc<dyn StorageBackend>,
    stream: Stream,
    directory: Arc<PersonaDirectory>,
    clock: Arc<dyn Clock>,
    recent_limit: usize,
    retention_days: u32,
) -> StreamState<A, D, R>
where
    A: StreamAction,
    D: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
    R: CounterRecord<Action = A>,
{
    let events = Arc::new(EventLogStore::<Event<A, D>>::new(backend.clone(), stream));
    let stats = Arc::new(StatsStore::<R>::new(backend, stream, retention_days));
    StreamState {
        ingestion: Arc::new(IngestionService::new(
            events.clone(),
            stats.clone(),
            clock.clone(),
        )),
        query: Arc::new(QueryService::new(
            events,
            stats,
            directory,
            clock,
            recent_limit,
        )),
    }
}

/// Open storage and wire both streams' services.
pub fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let backend = open_backend(config)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let directory = Arc::new(PersonaDirectory::new(config.personas.clone()));
    info!("Persona directory loaded ({} entries)", config.personas.len());

    let warmup = build_stream_state(
        backend.clone(),
        Stream::Warmup,
        directory.clone(),
        clock.clone(),
        config.dashboard.warmup_recent_limit,
        config.dashboard.retention_days,
    );
    let posts = build_stream_state(
        backend,
        Stream::Posts,
        directory,
        clock,
        config.dashboard.posts_recent_limit,
        config.dashboard.retention_days,
    );

    Ok(ApplicationComponents {
        warmup: web::Data::new(warmup),
        posts: web::Data::new(posts),
    })
}

/// Permissive CORS: producers are browser extensions running on
/// arbitrary origins, and the dashboard front end polls cross-origin.
pub fn build_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Start the HTTP server and serve until shutdown.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);
    info!("Endpoints: POST /v1/{{warmup,posts}}/events, GET /v1/{{warmup,posts}}/today");

    let warmup = components.warmup;
    let posts = components.posts;

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(build_cors())
            .app_data(warmup.clone())
            .app_data(posts.clone())
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .workers(if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    })
    .run()
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::test;

    fn memory_config() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.storage.backend = "memory".to_string();
        config
    }

    #[actix_web::test]
    async fn test_bootstrap_wires_both_streams() {
        let components = bootstrap(&memory_config()).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(components.warmup.clone())
                .app_data(components.posts.clone())
                .configure(configure_routes),
        )
        .await;

        for uri in ["/v1/warmup/today", "/v1/posts/today"] {
            let resp =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), 200, "GET {}", uri);
        }
    }

    #[actix_web::test]
    async fn test_cors_preflight_allows_any_origin() {
        let components = bootstrap(&memory_config()).unwrap();
        let app = test::init_service(
            App::new()
                .wrap(build_cors())
                .app_data(components.warmup.clone())
                .app_data(components.posts.clone())
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::default()
                .method(actix_web::http::Method::OPTIONS)
                .uri("/v1/warmup/events")
                .insert_header((header::ORIGIN, "http://localhost:3000"))
                .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
                .to_request(),
        )
        .await;
        assert!(resp.status().is_success());
        assert!(resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
