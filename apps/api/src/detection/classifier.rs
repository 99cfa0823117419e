//! Page classifier — decides whether a page snapshot is a job application.
//!
//! Each heuristic is an independent boolean signal; confidence is the number of
//! signals that fired. A known ATS host counts twice.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::models::detection::{DetectionResult, ACCEPTANCE_THRESHOLD};
use crate::models::page::{FieldKind, PageSnapshot};

/// Hosts of applicant tracking systems and big-company career sites.
pub const KNOWN_ATS_PLATFORMS: &[&str] = &[
    "greenhouse.io",
    "lever.co",
    "workday.com",
    "ashby.com",
    "bamboohr.com",
    "taleo.net",
    "icims.com",
    "jobvite.com",
    "smartrecruiters.com",
    "careers.google.com",
    "careers.apple.com",
    "careers.microsoft.com",
    "jobs.netflix.com",
    "jobs.apple.com",
];

/// Signals needed for a page to count as a job application. Shares the score
/// bar of `ACCEPTANCE_THRESHOLD`, so every job page is also accepted; acceptance
/// additionally admits known ATS hosts below it.
pub const JOB_PAGE_THRESHOLD: u32 = ACCEPTANCE_THRESHOLD;

/// Upper bound on confidence: 5 url + 2 ats + 3 title + 1 button + 3 field + 1 name-pattern.
pub const MAX_SIGNALS: u32 = 15;

const URL_PATTERNS: &[&str] = &[
    "/apply",
    "/jobs/",
    "/careers",
    "/job-application",
    "/application",
];

static TITLE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)apply\s+for").unwrap(),
        Regex::new(r"(?i)job\s+application").unwrap(),
        Regex::new(r"(?i)submit.*application").unwrap(),
    ]
});

static APPLY_BUTTON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)apply|submit\s*application|next|continue").unwrap());

static NAME_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"first.?name|last.?name").unwrap(),
        Regex::new(r"email|phone").unwrap(),
        Regex::new(r"experience|skills").unwrap(),
    ]
});

/// Lowercased host of `url`, or empty when it does not parse.
pub fn hostname_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_default()
}

pub fn is_known_ats(hostname: &str) -> bool {
    KNOWN_ATS_PLATFORMS
        .iter()
        .any(|platform| hostname.contains(platform))
}

/// Scores a page snapshot. Missing elements simply leave their signals false.
pub fn classify(page: &PageSnapshot) -> DetectionResult {
    let mut signals: Vec<bool> = Vec::with_capacity(MAX_SIGNALS as usize);

    let url_lower = page.url.to_lowercase();
    signals.extend(URL_PATTERNS.iter().map(|p| url_lower.contains(p)));

    let hostname = hostname_of(&page.url);
    let known_ats = is_known_ats(&hostname);
    if known_ats {
        signals.extend([true, true]);
    }

    signals.extend(TITLE_PATTERNS.iter().map(|re| re.is_match(&page.title)));

    signals.push(page.buttons.iter().any(|text| APPLY_BUTTON.is_match(text)));

    let fields = &page.fields;
    signals.push(fields.iter().any(|f| f.is_input_of_type("email")));
    signals.push(fields.iter().any(|f| f.is_input_of_type("file")));
    signals.push(fields.iter().any(|f| {
        f.kind == FieldKind::Textarea || f.name.to_lowercase().contains("experience")
    }));

    let field_names = fields
        .iter()
        .filter(|f| !f.name.is_empty())
        .map(|f| f.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let pattern_hits = NAME_PATTERNS
        .iter()
        .filter(|re| re.is_match(&field_names))
        .count();
    signals.push(pattern_hits >= 2);

    let confidence = signals.iter().filter(|s| **s).count() as u32;

    DetectionResult {
        is_job_page: confidence >= JOB_PAGE_THRESHOLD,
        confidence,
        url: page.url.clone(),
        title: page.title.clone(),
        hostname,
        is_known_ats: known_ats,
    }
}
