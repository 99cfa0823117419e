use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;

use crate::detection::classifier::{classify, KNOWN_ATS_PLATFORMS};
use crate::detection::{inspect_page, record_detection};
use crate::errors::AppError;
use crate::models::application::APPLICATION_CAP;
use crate::models::detection::{DetectedJob, DetectionResult, ACCEPTANCE_THRESHOLD};
use crate::models::page::PageSnapshot;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSettings {
    pub poll_interval_ms: u64,
    pub acceptance_threshold: u32,
    pub application_cap: usize,
    pub known_ats_platforms: &'static [&'static str],
}

#[derive(Serialize)]
pub struct DetectionReportResponse {
    pub detection: DetectionResult,
    pub acknowledged: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedJobResponse {
    pub detected_job: Option<DetectedJob>,
}

/// GET /api/v1/extension/settings
pub async fn handle_settings(State(state): State<AppState>) -> Json<ExtensionSettings> {
    Json(ExtensionSettings {
        poll_interval_ms: state.config.poll_interval_ms,
        acceptance_threshold: ACCEPTANCE_THRESHOLD,
        application_cap: APPLICATION_CAP,
        known_ats_platforms: KNOWN_ATS_PLATFORMS,
    })
}

/// POST /api/v1/detect
pub async fn handle_detect(Json(page): Json<PageSnapshot>) -> Json<DetectionResult> {
    Json(classify(&page))
}

/// POST /api/v1/detect/report
pub async fn handle_detect_report(
    State(state): State<AppState>,
    Json(page): Json<PageSnapshot>,
) -> Result<Json<DetectionReportResponse>, AppError> {
    let job = inspect_page(&page, Utc::now());
    let detection = job.detection.clone();
    let acknowledged = record_detection(&state, job).await?;
    Ok(Json(DetectionReportResponse {
        detection,
        acknowledged,
    }))
}

/// GET /api/v1/detected-job
pub async fn handle_get_detected_job(
    State(state): State<AppState>,
) -> Result<Json<DetectedJobResponse>, AppError> {
    let detected_job = state.detections.get_detected_job().await?;
    Ok(Json(DetectedJobResponse { detected_job }))
}

/// DELETE /api/v1/detected-job
pub async fn handle_clear_detected_job(
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.detections.clear_detected_job().await?;
    Ok(StatusCode::NO_CONTENT)
}
