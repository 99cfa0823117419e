use std::str::FromStr;

use crate::models::application::{ApplicationRecord, ApplicationStatus, StatusParseError};

/// The board's status dropdown: every column, or exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn admits(&self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Records passing the status filter whose title or company contains `query`,
/// case-insensitively. Input order is kept.
pub fn filter_applications<'a>(
    records: &'a [ApplicationRecord],
    status: StatusFilter,
    query: &str,
) -> Vec<&'a ApplicationRecord> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|r| status.admits(r.status))
        .filter(|r| {
            needle.is_empty()
                || r.job_title.to_lowercase().contains(&needle)
                || r.company.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::NewApplication;
    use chrono::Utc;

    fn record(title: &str, company: &str, status: ApplicationStatus) -> ApplicationRecord {
        NewApplication {
            job_title: title.to_string(),
            company: company.to_string(),
            status,
            ..Default::default()
        }
        .into_record(Utc::now())
    }

    fn board() -> Vec<ApplicationRecord> {
        vec![
            record("Backend Engineer", "Acme", ApplicationStatus::Applied),
            record("Data Scientist", "Globex", ApplicationStatus::Interviewing),
            record("Frontend Engineer", "Initech", ApplicationStatus::Rejected),
        ]
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("All".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!("".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "offer".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(ApplicationStatus::Offer))
        );
        assert!("Ghosted".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_query_matches_title_or_company_case_insensitively() {
        let records = board();
        let hits = filter_applications(&records, StatusFilter::All, "ENGINEER");
        assert_eq!(hits.len(), 2);

        let hits = filter_applications(&records, StatusFilter::All, "globex");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].job_title, "Data Scientist");
    }

    #[test]
    fn test_status_and_query_combine() {
        let records = board();
        let hits = filter_applications(
            &records,
            StatusFilter::Only(ApplicationStatus::Rejected),
            "engineer",
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company, "Initech");
    }

    #[test]
    fn test_empty_query_with_all_returns_everything_in_order() {
        let records = board();
        let hits = filter_applications(&records, StatusFilter::All, "  ");
        let companies: Vec<_> = hits.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(companies, ["Acme", "Globex", "Initech"]);
    }
}
