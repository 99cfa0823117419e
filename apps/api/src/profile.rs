use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::ProfileRecord;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub data: Option<ProfileRecord>,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let data = state.profiles.get_profile().await?;
    Ok(Json(ProfileResponse { data }))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(profile): Json<ProfileRecord>,
) -> Result<Json<ProfileResponse>, AppError> {
    state.profiles.save_profile(&profile).await?;
    info!("Profile saved ({} skills)", profile.skills.len());
    Ok(Json(ProfileResponse {
        data: Some(profile),
    }))
}
