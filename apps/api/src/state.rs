use std::sync::Arc;

use crate::config::Config;
use crate::messages::events::EventHub;
use crate::store::{ApplicationStore, DetectionStore, ProfileStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub applications: Arc<dyn ApplicationStore>,
    /// Pending detection slot. Redis in production.
    pub detections: Arc<dyn DetectionStore>,
    /// Notifies an open popup that a job was detected.
    pub events: EventHub,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State backed by a single `MemoryStore` for all three stores.
    pub fn in_memory() -> Self {
        let store = Arc::new(crate::store::MemoryStore::new());
        AppState {
            profiles: store.clone(),
            applications: store.clone(),
            detections: store,
            events: EventHub::new(),
            config: Config {
                database_url: "postgres://localhost/speedyapply_test".to_string(),
                redis_url: "redis://localhost".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
                poll_interval_ms: 5000,
                max_upload_bytes: 10 * 1024 * 1024,
            },
        }
    }
}
