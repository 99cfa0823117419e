use chrono::{DateTime, Utc};

use crate::detection::classifier::hostname_of;
use crate::models::detection::JobDetails;
use crate::models::page::{PageSnapshot, TextElement};

const DEFAULT_JOB_TITLE: &str = "Job Application";

/// The subset of CSS selectors the extractor understands.
#[derive(Debug, Clone, Copy)]
enum Selector {
    Tag(&'static str),
    TestId(&'static str),
    Class(&'static str),
}

impl Selector {
    fn matches(&self, element: &TextElement) -> bool {
        match self {
            Selector::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            Selector::TestId(id) => element.test_id == *id,
            Selector::Class(class) => element.classes.iter().any(|c| c == class),
        }
    }
}

const JOB_TITLE_SELECTORS: &[Selector] = &[
    Selector::Tag("h1"),
    Selector::TestId("job-title"),
    Selector::Class("job-title"),
    Selector::Class("position-title"),
];

const COMPANY_SELECTORS: &[Selector] = &[
    Selector::TestId("company"),
    Selector::Class("company-name"),
    Selector::Class("organization-name"),
];

/// Trimmed text of the first element matched by the earliest selector whose
/// first match has non-empty text.
fn first_text(elements: &[TextElement], selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        elements
            .iter()
            .find(|el| selector.matches(el))
            .map(|el| el.text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

/// Second-to-last hostname label ("acme" for "jobs.acme.com").
pub fn company_from_hostname(hostname: &str) -> String {
    let parts: Vec<&str> = hostname.split('.').collect();
    if parts.len() >= 2 {
        parts[parts.len() - 2].to_string()
    } else {
        hostname.to_string()
    }
}

pub fn extract_job_details(page: &PageSnapshot, now: DateTime<Utc>) -> JobDetails {
    let job_title = first_text(&page.elements, JOB_TITLE_SELECTORS)
        .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string());
    let company_name = first_text(&page.elements, COMPANY_SELECTORS)
        .unwrap_or_else(|| company_from_hostname(&hostname_of(&page.url)));

    JobDetails {
        job_title,
        company_name,
        url: page.url.clone(),
        date: now.format("%Y-%m-%d").to_string(),
    }
}
