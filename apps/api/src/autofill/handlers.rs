use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::autofill::field_mapper::{map_fields, FillPlan};
use crate::errors::AppError;
use crate::models::page::FieldDescriptor;
use crate::models::profile::ProfileRecord;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AutofillRequest {
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Profile to fill from; the stored profile when absent.
    pub profile: Option<ProfileRecord>,
}

#[derive(Serialize)]
pub struct AutofillResponse {
    pub success: bool,
    pub plan: Option<FillPlan>,
}

/// Plans a fill from `profile`, or from the stored profile when `None`.
/// With neither there is nothing to fill and the plan is `None`.
pub async fn plan_autofill(
    state: &AppState,
    fields: &[FieldDescriptor],
    profile: Option<ProfileRecord>,
) -> Result<Option<FillPlan>, AppError> {
    let profile = match profile {
        Some(p) => Some(p),
        None => state.profiles.get_profile().await?,
    };
    let Some(profile) = profile else {
        debug!("Autofill requested with no profile on file");
        return Ok(None);
    };

    let plan = map_fields(fields, &profile);
    debug!(
        fields = fields.len(),
        filled = plan.filled_count,
        "Autofill planned"
    );
    Ok(Some(plan))
}

/// POST /api/v1/autofill
pub async fn handle_autofill(
    State(state): State<AppState>,
    Json(req): Json<AutofillRequest>,
) -> Result<Json<AutofillResponse>, AppError> {
    let plan = plan_autofill(&state, &req.fields, req.profile).await?;
    Ok(Json(AutofillResponse {
        success: true,
        plan,
    }))
}
