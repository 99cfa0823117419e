// Application tracker: board filtering, status moves and dashboard analytics.

pub mod analytics;
pub mod board;
pub mod handlers;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRecord, ApplicationStatus, NewApplication};
use crate::state::AppState;

/// Records a new application and returns it as stored.
pub async fn save_application(
    state: &AppState,
    new: NewApplication,
    now: DateTime<Utc>,
) -> Result<ApplicationRecord, AppError> {
    let record = new.into_record(now);
    state.applications.append_application(&record).await?;
    info!(
        id = %record.id,
        company = %record.company,
        status = %record.status,
        "Application tracked"
    );
    Ok(record)
}

/// Moves one application to another board column.
pub async fn move_application(
    state: &AppState,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<ApplicationRecord, AppError> {
    let updated = state
        .applications
        .update_status(id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    info!(%id, %status, "Application moved");
    Ok(updated)
}
