use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::ProfileRecord;
use crate::resume::extractor::ParsedResumeData;
use crate::resume::parse_resume;
use crate::state::AppState;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Deserialize, Default)]
pub struct ParseQuery {
    /// Merge the parsed fields into the stored profile.
    #[serde(default)]
    pub apply: bool,
}

#[derive(Serialize)]
pub struct ResumeParseResponse {
    pub parsed: ParsedResumeData,
    /// The stored profile after merging; present only when `apply` was set.
    pub profile: Option<ProfileRecord>,
}

/// Browsers often send a generic type for local files; fall back to the extension.
fn effective_mime(content_type: Option<&str>, file_name: Option<&str>) -> String {
    match content_type {
        Some(ct) if !ct.is_empty() && !ct.eq_ignore_ascii_case(OCTET_STREAM) => ct.to_string(),
        _ => mime_from_file_name(file_name.unwrap_or_default()).to_string(),
    }
}

fn mime_from_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "txt" | "md" => "text/plain",
        _ => OCTET_STREAM,
    }
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let mime = effective_mime(field.content_type(), field.file_name());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        return Ok((mime, bytes));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

/// POST /api/v1/resume/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Query(query): Query<ParseQuery>,
    mut multipart: Multipart,
) -> Result<Json<ResumeParseResponse>, AppError> {
    let (mime, bytes) = read_file_field(&mut multipart).await?;
    info!(mime = %mime, bytes = bytes.len(), "Parsing uploaded resume");

    let parsed = parse_resume(&mime, bytes).await?;

    let profile = if query.apply {
        let mut profile = state.profiles.get_profile().await?.unwrap_or_default();
        profile.merge_parsed(&parsed);
        state.profiles.save_profile(&profile).await?;
        info!("Resume fields merged into stored profile");
        Some(profile)
    } else {
        None
    };

    Ok(Json(ResumeParseResponse { parsed, profile }))
}
