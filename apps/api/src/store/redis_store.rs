use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::models::detection::{DetectedJob, DETECTED_JOB_KEY};
use crate::store::DetectionStore;

/// Pending-detection slot kept in Redis as a single JSON string.
///
/// Holds one multiplexed connection for the life of the process; each call
/// works on a cheap clone of it.
#[derive(Clone)]
pub struct RedisDetectionStore {
    conn: MultiplexedConnection,
    key: String,
}

impl RedisDetectionStore {
    pub async fn connect(client: &redis::Client) -> Result<Self> {
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .context("failed to open Redis connection")?;
        info!("Redis connection established");
        Ok(Self::with_connection(conn))
    }

    pub fn with_connection(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            key: format!("speedyapply:{DETECTED_JOB_KEY}"),
        }
    }

    fn connection(&self) -> MultiplexedConnection {
        self.conn.clone()
    }
}

#[async_trait]
impl DetectionStore for RedisDetectionStore {
    async fn get_detected_job(&self) -> Result<Option<DetectedJob>> {
        let mut conn = self.connection();
        let raw: Option<String> = conn.get(&self.key).await?;
        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .context("stored detected job is not valid JSON")
    }

    async fn set_detected_job(&self, job: &DetectedJob) -> Result<()> {
        let json = serde_json::to_string(job)?;
        let mut conn = self.connection();
        conn.set::<_, _, ()>(&self.key, json).await?;
        debug!(url = %job.detection.url, "Pending detection replaced");
        Ok(())
    }

    async fn clear_detected_job(&self) -> Result<()> {
        let mut conn = self.connection();
        conn.del::<_, ()>(&self.key).await?;
        Ok(())
    }
}
