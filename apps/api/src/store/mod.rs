//! Repository traits for the three pieces of persisted extension state.
//!
//! `AppState` carries each as an `Arc<dyn _>` so handlers never touch a backend
//! directly. Production wires Postgres (profile, applications) and Redis
//! (pending detection); tests use `MemoryStore` for all three.

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod redis_store;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::application::{ApplicationRecord, ApplicationStatus};
use crate::models::detection::DetectedJob;
use crate::models::profile::ProfileRecord;

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use redis_store::RedisDetectionStore;

/// `onboardingData`: a single opaque profile value, last write wins.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self) -> Result<Option<ProfileRecord>>;
    async fn save_profile(&self, profile: &ProfileRecord) -> Result<()>;
}

/// `applications`: append-only list capped at `APPLICATION_CAP`, oldest first out.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// All records, oldest first.
    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>>;
    /// Appends and evicts the oldest records beyond the cap.
    async fn append_application(&self, record: &ApplicationRecord) -> Result<()>;
    /// Returns the updated record, or `None` when no record has that id.
    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRecord>>;
}

/// `detectedJob`: one optional slot, last write wins.
#[async_trait]
pub trait DetectionStore: Send + Sync {
    async fn get_detected_job(&self) -> Result<Option<DetectedJob>>;
    async fn set_detected_job(&self, job: &DetectedJob) -> Result<()>;
    async fn clear_detected_job(&self) -> Result<()>;
}
