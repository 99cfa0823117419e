use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::{Education, WorkExperience};

/// Storage key for the single pending detection slot.
pub const DETECTED_JOB_KEY: &str = "detectedJob";

/// A detection is persisted when it reaches this many signals, or when the
/// host is a known ATS regardless of score.
pub const ACCEPTANCE_THRESHOLD: u32 = 3;

/// Classifier verdict for one page visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub is_job_page: bool,
    pub confidence: u32,
    pub url: String,
    pub title: String,
    pub hostname: String,
    #[serde(rename = "isKnownATS")]
    pub is_known_ats: bool,
}

impl DetectionResult {
    pub fn is_accepted(&self) -> bool {
        self.confidence >= ACCEPTANCE_THRESHOLD || self.is_known_ats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDetails {
    pub job_title: String,
    pub company_name: String,
    pub url: String,
    pub date: String,
}

/// Values already typed into an application form when the page was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapturedFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub timestamp: DateTime<Utc>,
}

impl Default for CapturedFormData {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            skills: Vec::new(),
            work_experience: Vec::new(),
            education: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}

/// Contents of the pending detection slot, awaiting confirm/decline in the popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedJob {
    pub detection: DetectionResult,
    pub job_details: JobDetails,
    pub form_data: CapturedFormData,
    pub detected_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(confidence: u32, is_known_ats: bool) -> DetectionResult {
        DetectionResult {
            is_job_page: confidence >= 3,
            confidence,
            is_known_ats,
            ..Default::default()
        }
    }

    #[test]
    fn test_acceptance_by_confidence() {
        assert!(detection(3, false).is_accepted());
        assert!(!detection(2, false).is_accepted());
    }

    #[test]
    fn test_acceptance_by_known_ats_alone() {
        assert!(detection(2, true).is_accepted());
    }

    #[test]
    fn test_detection_wire_names_match_extension() {
        let value = serde_json::to_value(detection(4, true)).unwrap();
        assert_eq!(value["isJobPage"], true);
        assert_eq!(value["isKnownATS"], true);
        assert_eq!(value["confidence"], 4);
    }

    #[test]
    fn test_captured_form_data_tolerates_missing_fields() {
        let data: CapturedFormData =
            serde_json::from_str(r#"{"email": "a@b.com", "timestamp": "2025-03-01T10:00:00Z"}"#)
                .unwrap();
        assert_eq!(data.email, "a@b.com");
        assert!(data.skills.is_empty());
    }
}
