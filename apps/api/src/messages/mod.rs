//! The extension's message protocol.
//!
//! Every request the content script or popup sends is `{"action": ..., ...}`.
//! Each action deserializes into one `ExtensionRequest` variant and yields one
//! typed response.

pub mod events;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::autofill::field_mapper::{map_fields, FillPlan};
use crate::autofill::handlers::plan_autofill;
use crate::detection::capture::capture_form_data;
use crate::detection::classifier::classify;
use crate::detection::job_details::extract_job_details;
use crate::detection::record_detection;
use crate::errors::AppError;
use crate::models::application::{ApplicationRecord, NewApplication};
use crate::models::detection::{CapturedFormData, DetectedJob, DetectionResult, JobDetails};
use crate::models::page::{FieldDescriptor, PageSnapshot};
use crate::models::profile::ProfileRecord;
use crate::state::AppState;
use crate::tracker::save_application;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ExtensionRequest {
    GetProfileData,
    SaveProfileData {
        data: ProfileRecord,
    },
    AutofillForm {
        #[serde(default)]
        fields: Vec<FieldDescriptor>,
    },
    FillForm {
        data: ProfileRecord,
        #[serde(default)]
        fields: Vec<FieldDescriptor>,
    },
    #[serde(rename_all = "camelCase")]
    JobApplicationDetected {
        detection: DetectionResult,
        #[serde(default)]
        job_details: JobDetails,
        #[serde(default)]
        form_data: CapturedFormData,
    },
    SaveApplication {
        data: NewApplication,
    },
    GetApplications,
    GetDetectedJob,
    ClearDetectedJob,
    DetectJobPage {
        page: PageSnapshot,
    },
    CaptureFormData {
        page: PageSnapshot,
    },
}

impl ExtensionRequest {
    pub fn action(&self) -> &'static str {
        match self {
            ExtensionRequest::GetProfileData => "getProfileData",
            ExtensionRequest::SaveProfileData { .. } => "saveProfileData",
            ExtensionRequest::AutofillForm { .. } => "autofillForm",
            ExtensionRequest::FillForm { .. } => "fillForm",
            ExtensionRequest::JobApplicationDetected { .. } => "jobApplicationDetected",
            ExtensionRequest::SaveApplication { .. } => "saveApplication",
            ExtensionRequest::GetApplications => "getApplications",
            ExtensionRequest::GetDetectedJob => "getDetectedJob",
            ExtensionRequest::ClearDetectedJob => "clearDetectedJob",
            ExtensionRequest::DetectJobPage { .. } => "detectJobPage",
            ExtensionRequest::CaptureFormData { .. } => "captureFormData",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub data: Option<ProfileRecord>,
}

#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct FillResult {
    pub success: bool,
    pub plan: Option<FillPlan>,
}

#[derive(Debug, Serialize)]
pub struct Acknowledgement {
    pub acknowledged: bool,
}

#[derive(Debug, Serialize)]
pub struct SavedApplication {
    pub success: bool,
    pub application: ApplicationRecord,
}

#[derive(Debug, Serialize)]
pub struct Applications {
    pub applications: Vec<ApplicationRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDetection {
    pub detected_job: Option<DetectedJob>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedPage {
    pub form_data: CapturedFormData,
    pub job_details: JobDetails,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ExtensionResponse {
    Profile(ProfileData),
    Success(Success),
    Fill(FillResult),
    Acknowledgement(Acknowledgement),
    SavedApplication(SavedApplication),
    Applications(Applications),
    PendingDetection(PendingDetection),
    Detection(DetectionResult),
    Captured(CapturedPage),
}

fn success() -> ExtensionResponse {
    ExtensionResponse::Success(Success { success: true })
}

/// Executes one extension request against the shared state.
pub async fn dispatch(
    state: &AppState,
    request: ExtensionRequest,
    now: DateTime<Utc>,
) -> Result<ExtensionResponse, AppError> {
    debug!(action = request.action(), "Dispatching extension message");

    let response = match request {
        ExtensionRequest::GetProfileData => ExtensionResponse::Profile(ProfileData {
            data: state.profiles.get_profile().await?,
        }),
        ExtensionRequest::SaveProfileData { data } => {
            state.profiles.save_profile(&data).await?;
            success()
        }
        ExtensionRequest::AutofillForm { fields } => ExtensionResponse::Fill(FillResult {
            success: true,
            plan: plan_autofill(state, &fields, None).await?,
        }),
        ExtensionRequest::FillForm { data, fields } => ExtensionResponse::Fill(FillResult {
            success: true,
            plan: Some(map_fields(&fields, &data)),
        }),
        ExtensionRequest::JobApplicationDetected {
            detection,
            job_details,
            form_data,
        } => {
            let job = DetectedJob {
                detection,
                job_details,
                form_data,
                detected_at: now,
            };
            ExtensionResponse::Acknowledgement(Acknowledgement {
                acknowledged: record_detection(state, job).await?,
            })
        }
        ExtensionRequest::SaveApplication { data } => {
            let application = save_application(state, data, now).await?;
            ExtensionResponse::SavedApplication(SavedApplication {
                success: true,
                application,
            })
        }
        ExtensionRequest::GetApplications => ExtensionResponse::Applications(Applications {
            applications: state.applications.list_applications().await?,
        }),
        ExtensionRequest::GetDetectedJob => ExtensionResponse::PendingDetection(PendingDetection {
            detected_job: state.detections.get_detected_job().await?,
        }),
        ExtensionRequest::ClearDetectedJob => {
            state.detections.clear_detected_job().await?;
            success()
        }
        ExtensionRequest::DetectJobPage { page } => ExtensionResponse::Detection(classify(&page)),
        ExtensionRequest::CaptureFormData { page } => ExtensionResponse::Captured(CapturedPage {
            form_data: capture_form_data(&page, now),
            job_details: extract_job_details(&page, now),
        }),
    };

    Ok(response)
}

/// POST /api/v1/messages
pub async fn handle_message(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ExtensionResponse>, AppError> {
    let request: ExtensionRequest = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("invalid extension message: {e}")))?;
    let response = dispatch(&state, request, Utc::now()).await?;
    Ok(Json(response))
}
