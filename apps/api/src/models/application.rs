use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Maximum number of tracked applications. Appending beyond this evicts the oldest.
pub const APPLICATION_CAP: usize = 100;

/// Board column. The five values are the only states an application can be in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Screen,
    Interviewing,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    /// Board order, left to right.
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Screen,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Screen => "Screen",
            ApplicationStatus::Interviewing => "Interviewing",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown application status '{0}'")]
pub struct StatusParseError(pub String);

impl FromStr for ApplicationStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

/// A tracked job application as shown on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub status: ApplicationStatus,
    pub date: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// Payload for recording a new application. Identity and timestamp are assigned
/// server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewApplication {
    pub job_title: String,
    pub company: String,
    pub status: ApplicationStatus,
    pub date: String,
    pub url: String,
}

impl NewApplication {
    pub fn into_record(self, now: DateTime<Utc>) -> ApplicationRecord {
        let date = if self.date.trim().is_empty() {
            now.date_naive().format("%Y-%m-%d").to_string()
        } else {
            self.date
        };
        ApplicationRecord {
            id: Uuid::new_v4(),
            job_title: self.job_title,
            company: self.company,
            status: self.status,
            date,
            url: self.url,
            timestamp: now,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub status: String,
    pub date: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for ApplicationRecord {
    type Error = StatusParseError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(ApplicationRecord {
            id: row.id,
            job_title: row.job_title,
            company: row.company,
            status: row.status.parse()?,
            date: row.date,
            url: row.url,
            timestamp: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!(
            "interviewing".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Interviewing)
        );
        assert_eq!(" Offer ".parse::<ApplicationStatus>(), Ok(ApplicationStatus::Offer));
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        let err = "Ghosted".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err, StatusParseError("Ghosted".to_string()));
    }

    #[test]
    fn test_status_serde_uses_board_labels() {
        let json = serde_json::to_string(&ApplicationStatus::Screen).unwrap();
        assert_eq!(json, r#""Screen""#);
        assert!(serde_json::from_str::<ApplicationStatus>(r#""Pending""#).is_err());
    }

    #[test]
    fn test_new_application_defaults_to_applied_and_today() {
        let now = Utc::now();
        let record = NewApplication {
            job_title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        }
        .into_record(now);

        assert_eq!(record.status, ApplicationStatus::Applied);
        assert_eq!(record.date, now.format("%Y-%m-%d").to_string());
        assert_eq!(record.timestamp, now);
    }

    #[test]
    fn test_row_with_corrupt_status_is_rejected() {
        let row = ApplicationRow {
            id: Uuid::new_v4(),
            job_title: "SRE".to_string(),
            company: "Acme".to_string(),
            status: "Unknown".to_string(),
            date: "2025-01-01".to_string(),
            url: String::new(),
            created_at: Utc::now(),
        };
        assert!(ApplicationRecord::try_from(row).is_err());
    }
}
