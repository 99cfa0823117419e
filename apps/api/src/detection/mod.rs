//! Job-application page detection.
//!
//! The classifier scores a page snapshot; an accepted report is written to the
//! single pending-detection slot and announced to any open popup.

pub mod capture;
pub mod classifier;
pub mod handlers;
pub mod job_details;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::detection::capture::capture_form_data;
use crate::detection::classifier::{classify, JOB_PAGE_THRESHOLD, MAX_SIGNALS};
use crate::detection::job_details::extract_job_details;
use crate::errors::AppError;
use crate::messages::events::ExtensionEvent;
use crate::models::detection::DetectedJob;
use crate::models::page::PageSnapshot;
use crate::state::AppState;

/// Classifies `page` and, for job pages, gathers the details the popup needs.
pub fn inspect_page(page: &PageSnapshot, now: DateTime<Utc>) -> DetectedJob {
    let detection = classify(page);
    let (job_details, form_data) = if detection.is_job_page {
        (extract_job_details(page, now), capture_form_data(page, now))
    } else {
        Default::default()
    };

    DetectedJob {
        detection,
        job_details,
        form_data,
        detected_at: now,
    }
}

/// Stores a reported detection when it clears the acceptance bar and notifies
/// listeners. Returns whether it was accepted. A confidence above the number
/// of signals the classifier evaluates is rejected.
pub async fn record_detection(state: &AppState, mut job: DetectedJob) -> Result<bool, AppError> {
    if job.detection.confidence > MAX_SIGNALS {
        return Err(AppError::Validation(format!(
            "confidence {} exceeds the maximum of {MAX_SIGNALS} signals",
            job.detection.confidence
        )));
    }

    // The stored flag always follows the score, whatever the reporter sent.
    job.detection.is_job_page = job.detection.confidence >= JOB_PAGE_THRESHOLD;

    if !job.detection.is_accepted() {
        debug!(
            confidence = job.detection.confidence,
            url = %job.detection.url,
            "Detection below acceptance threshold"
        );
        return Ok(false);
    }

    state.detections.set_detected_job(&job).await?;
    info!(
        confidence = job.detection.confidence,
        known_ats = job.detection.is_known_ats,
        company = %job.job_details.company_name,
        "Job application detected"
    );
    state.events.publish(ExtensionEvent::JobDetected { job });
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::detection::DetectionResult;
    use crate::models::page::{FieldDescriptor, TextElement};

    fn job_page() -> PageSnapshot {
        PageSnapshot {
            url: "https://careers.acme.com/jobs/42/apply".to_string(),
            title: "Apply - Backend Engineer".to_string(),
            buttons: vec!["Submit Application".to_string()],
            fields: vec![FieldDescriptor {
                name: "email".to_string(),
                value: "jane@x.com".to_string(),
                ..Default::default()
            }],
            elements: vec![TextElement {
                tag: "h1".to_string(),
                text: "Backend Engineer".to_string(),
                ..Default::default()
            }],
        }
    }

    fn report(confidence: u32, is_known_ats: bool) -> DetectedJob {
        DetectedJob {
            detection: DetectionResult {
                is_job_page: false,
                confidence,
                is_known_ats,
                ..Default::default()
            },
            job_details: Default::default(),
            form_data: Default::default(),
            detected_at: Utc::now(),
        }
    }

    #[test]
    fn test_inspect_job_page_fills_details() {
        let job = inspect_page(&job_page(), Utc::now());
        assert!(job.detection.is_job_page);
        assert_eq!(job.job_details.job_title, "Backend Engineer");
        assert_eq!(job.form_data.email, "jane@x.com");
    }

    #[test]
    fn test_inspect_non_job_page_leaves_details_empty() {
        let job = inspect_page(&PageSnapshot::default(), Utc::now());
        assert!(!job.detection.is_job_page);
        assert_eq!(job.job_details.job_title, "");
    }

    #[tokio::test]
    async fn test_accepted_report_is_stored_and_announced() {
        let state = AppState::in_memory();
        let mut rx = state.events.subscribe();

        assert!(record_detection(&state, report(4, false)).await.unwrap());

        let stored = state.detections.get_detected_job().await.unwrap().unwrap();
        assert!(stored.detection.is_job_page);
        assert!(matches!(rx.try_recv(), Ok(ExtensionEvent::JobDetected { .. })));
    }

    #[tokio::test]
    async fn test_known_ats_is_accepted_below_threshold() {
        let state = AppState::in_memory();
        assert!(record_detection(&state, report(2, true)).await.unwrap());
        let stored = state.detections.get_detected_job().await.unwrap().unwrap();
        assert!(!stored.detection.is_job_page);
    }

    #[tokio::test]
    async fn test_weak_report_is_not_stored() {
        let state = AppState::in_memory();
        assert!(!record_detection(&state, report(2, false)).await.unwrap());
        assert!(state.detections.get_detected_job().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_confidence_beyond_signal_count_is_rejected() {
        let state = AppState::in_memory();
        let result = record_detection(&state, report(999, false)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(state.detections.get_detected_job().await.unwrap().is_none());

        assert!(record_detection(&state, report(MAX_SIGNALS, false)).await.unwrap());
        let stored = state.detections.get_detected_job().await.unwrap().unwrap();
        assert!(stored.detection.confidence <= MAX_SIGNALS);
    }
}
