use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::application::{
    ApplicationRecord, ApplicationRow, ApplicationStatus, APPLICATION_CAP,
};
use crate::models::profile::{ProfileRecord, PROFILE_KEY};
use crate::store::{ApplicationStore, ProfileStore};

const APPLICATION_COLUMNS: &str = "id, job_title, company, status, date, url, created_at";

/// Postgres-backed profile and application repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    cap: usize,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            cap: APPLICATION_CAP,
        }
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn get_profile(&self) -> Result<Option<ProfileRecord>> {
        let value: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT value FROM extension_state WHERE key = $1")
                .bind(PROFILE_KEY)
                .fetch_optional(&self.pool)
                .await?;

        value
            .map(serde_json::from_value)
            .transpose()
            .context("stored profile is not a valid ProfileRecord")
    }

    async fn save_profile(&self, profile: &ProfileRecord) -> Result<()> {
        let value = serde_json::to_value(profile)?;
        sqlx::query(
            r#"
            INSERT INTO extension_state (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(PROFILE_KEY)
        .bind(value)
        .execute(&self.pool)
        .await?;

        debug!("Profile saved");
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY seq ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| ApplicationRecord::try_from(row).map_err(anyhow::Error::from))
            .collect()
    }

    async fn append_application(&self, record: &ApplicationRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO applications (id, job_title, company, status, date, url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(&record.job_title)
        .bind(&record.company)
        .bind(record.status.as_str())
        .bind(&record.date)
        .bind(&record.url)
        .bind(record.timestamp)
        .execute(&mut *tx)
        .await?;

        let evicted = sqlx::query(
            r#"
            DELETE FROM applications
            WHERE seq NOT IN (SELECT seq FROM applications ORDER BY seq DESC LIMIT $1)
            "#,
        )
        .bind(self.cap as i64)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        if evicted > 0 {
            info!("Evicted {evicted} oldest application(s) beyond cap {}", self.cap);
        }
        Ok(())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRecord>> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "UPDATE applications SET status = $1 WHERE id = $2 RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ApplicationRecord::try_from)
            .transpose()
            .map_err(anyhow::Error::from)
    }
}
