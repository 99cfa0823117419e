pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::autofill::handlers as autofill;
use crate::detection::handlers as detection;
use crate::messages;
use crate::profile;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::tracker::handlers as tracker;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Extension protocol
        .route("/api/v1/messages", post(messages::handle_message))
        .route("/api/v1/events", get(messages::events::handle_event_stream))
        .route("/api/v1/extension/settings", get(detection::handle_settings))
        // Detection
        .route("/api/v1/detect", post(detection::handle_detect))
        .route("/api/v1/detect/report", post(detection::handle_detect_report))
        .route(
            "/api/v1/detected-job",
            get(detection::handle_get_detected_job).delete(detection::handle_clear_detected_job),
        )
        // Profile & autofill
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        .route("/api/v1/autofill", post(autofill::handle_autofill))
        .route("/api/v1/resume/parse", post(resume::handle_parse_resume))
        // Tracker
        .route(
            "/api/v1/applications",
            get(tracker::handle_list_applications).post(tracker::handle_create_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(tracker::handle_update_status),
        )
        .route(
            "/api/v1/analytics/summary",
            get(tracker::handle_analytics_summary),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
