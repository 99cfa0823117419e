mod autofill;
mod config;
mod db;
mod detection;
mod errors;
mod messages;
mod models;
mod profile;
mod resume;
mod routes;
mod state;
mod store;
mod tracker;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::messages::events::EventHub;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{PgStore, RedisDetectionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SpeedyApply API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (profile + applications)
    let db = create_pool(&config.database_url).await?;
    let pg_store = Arc::new(PgStore::new(db));

    // Initialize Redis (pending detection slot)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let detections = RedisDetectionStore::connect(&redis).await?;

    let state = AppState {
        profiles: pg_store.clone(),
        applications: pg_store,
        detections: Arc::new(detections),
        events: EventHub::new(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // extension origins are chrome-extension://<id>

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
