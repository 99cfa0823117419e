use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRecord, ApplicationStatus, NewApplication};
use crate::state::AppState;
use crate::tracker::analytics::{summarize, AnalyticsSummary};
use crate::tracker::board::{filter_applications, StatusFilter};
use crate::tracker::{move_application, save_application};

#[derive(Deserialize, Default)]
pub struct BoardQuery {
    pub status: Option<String>,
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationRecord>,
    pub total: usize,
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<BoardQuery>,
) -> Result<Json<ApplicationListResponse>, AppError> {
    let filter: StatusFilter = params
        .status
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|e| AppError::Validation(format!("{e}")))?;

    let records = state.applications.list_applications().await?;
    let applications: Vec<ApplicationRecord> =
        filter_applications(&records, filter, params.q.as_deref().unwrap_or_default())
            .into_iter()
            .cloned()
            .collect();

    Ok(Json(ApplicationListResponse {
        total: records.len(),
        applications,
    }))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(new): Json<NewApplication>,
) -> Result<(StatusCode, Json<ApplicationRecord>), AppError> {
    let record = save_application(&state, new, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<ApplicationRecord>, AppError> {
    let status: ApplicationStatus = req
        .status
        .parse()
        .map_err(|e| AppError::Validation(format!("{e}")))?;
    let updated = move_application(&state, id, status).await?;
    Ok(Json(updated))
}

/// GET /api/v1/analytics/summary
pub async fn handle_analytics_summary(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let records = state.applications.list_applications().await?;
    Ok(Json(summarize(&records, Utc::now())))
}
