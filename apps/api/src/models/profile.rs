use serde::{Deserialize, Serialize};

use crate::resume::extractor::ParsedResumeData;

/// Storage key the extension uses for the onboarding profile.
pub const PROFILE_KEY: &str = "onboardingData";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub currently_working: bool,
    pub job_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub currently_attending: bool,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub language: String,
    pub proficiency: String,
    pub fluent: bool,
}

/// The user's onboarding profile. Stored as one opaque JSON value; every field
/// defaults to empty so partially filled payloads from the wizard round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,

    pub email: String,
    pub phone_country_code: String,
    pub phone_number: String,
    pub phone_device_type: String,

    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub languages: Vec<Language>,
    pub skills: Vec<String>,

    pub github_url: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
    pub work_authorization: String,
    pub sponsorship_required: bool,
    pub disability_status: String,
    pub veteran_status: String,
    pub age: String,
    pub gender: String,
    pub ethnicity: String,
}

impl ProfileRecord {
    /// "First Last", skipping whichever half is empty.
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Overlays values inferred from a resume. Non-empty parsed scalars win;
    /// list fields are replaced only when the resume produced entries.
    pub fn merge_parsed(&mut self, parsed: &ParsedResumeData) {
        overlay(&mut self.first_name, &parsed.first_name);
        overlay(&mut self.last_name, &parsed.last_name);
        overlay(&mut self.email, &parsed.email);
        overlay(&mut self.phone_number, &parsed.phone_number);
        overlay(&mut self.address_line1, &parsed.address);
        overlay(&mut self.city, &parsed.city);
        overlay(&mut self.state, &parsed.state);
        overlay(&mut self.postal_code, &parsed.postal_code);
        overlay(&mut self.country, &parsed.country);
        overlay(&mut self.github_url, &parsed.github_url);
        overlay(&mut self.linkedin_url, &parsed.linkedin_url);
        overlay(&mut self.portfolio_url, &parsed.portfolio_url);

        if !parsed.work_experience.is_empty() {
            self.work_experience = parsed.work_experience.clone();
        }
        if !parsed.education.is_empty() {
            self.education = parsed.education.clone();
        }
        if !parsed.skills.is_empty() {
            self.skills = parsed.skills.clone();
        }
    }
}

fn overlay(target: &mut String, value: &str) {
    if !value.is_empty() {
        *target = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_deserializes_with_defaults() {
        let json = r#"{"firstName": "Jane", "skills": ["Rust"], "sponsorshipRequired": true}"#;
        let profile: ProfileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(profile.first_name, "Jane");
        assert_eq!(profile.skills, vec!["Rust".to_string()]);
        assert!(profile.sponsorship_required);
        assert!(profile.email.is_empty());
        assert!(profile.work_experience.is_empty());
    }

    #[test]
    fn test_profile_serializes_camel_case_keys() {
        let profile = ProfileRecord {
            address_line1: "1 Main St".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["addressLine1"], "1 Main St");
        assert!(value.get("address_line1").is_none());
    }

    #[test]
    fn test_full_name_skips_empty_parts() {
        let mut profile = ProfileRecord {
            first_name: "Jane".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.full_name(), "Jane");
        profile.last_name = "Smith".to_string();
        assert_eq!(profile.full_name(), "Jane Smith");
    }

    #[test]
    fn test_merge_parsed_keeps_existing_when_parsed_empty() {
        let mut profile = ProfileRecord {
            first_name: "Janet".to_string(),
            city: "Austin".to_string(),
            skills: vec!["Go".to_string()],
            ..Default::default()
        };
        let parsed = ParsedResumeData {
            first_name: "Jane".to_string(),
            address: "1 Main St".to_string(),
            ..Default::default()
        };

        profile.merge_parsed(&parsed);

        assert_eq!(profile.first_name, "Jane");
        assert_eq!(profile.address_line1, "1 Main St");
        assert_eq!(profile.city, "Austin");
        assert_eq!(profile.skills, vec!["Go".to_string()]);
    }

    #[test]
    fn test_merge_parsed_replaces_non_empty_lists() {
        let mut profile = ProfileRecord {
            skills: vec!["Go".to_string()],
            ..Default::default()
        };
        let parsed = ParsedResumeData {
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            work_experience: vec![WorkExperience {
                job_title: "Engineer".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        profile.merge_parsed(&parsed);

        assert_eq!(profile.skills.len(), 2);
        assert_eq!(profile.work_experience[0].job_title, "Engineer");
    }
}
