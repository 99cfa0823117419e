//! Resume text extractor — regex heuristics over already-decoded resume text.
//!
//! Every field is extracted independently; a pattern that finds nothing leaves
//! its field empty. Precision is low by nature: work entries pair the i-th
//! title label with the i-th company label, with no semantic check.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::profile::{Education, WorkExperience};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResumeData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub github_url: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
}

/// Skills recognised by case-insensitive containment, reported in this order.
pub const SKILL_KEYWORDS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Vue",
    "Angular",
    "Node.js",
    "Python",
    "Java",
    "C++",
    "C#",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "Git",
    "HTML",
    "CSS",
    "REST",
    "GraphQL",
    "Agile",
    "Scrum",
    "Leadership",
    "Communication",
    "Problem Solving",
];

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b").unwrap()
});

static PHONE_NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d+]").unwrap());

static GITHUB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:github\.com|github)[/\s:]*/?(\S+)").unwrap());

static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:linkedin\.com|linkedin)[/\s:]*/?in[/\s:]*(\S+)").unwrap()
});

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").unwrap());

static JOB_TITLE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:job title|position|title|role|worked as|worked at|employed as)\b[\s:]*([^\n]+)",
    )
    .unwrap()
});

static COMPANY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:company|worked at|employed at|organization|at)\b[\s:]*([^\n]+)")
        .unwrap()
});

static DEGREE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor|b\.?s\.?|master|m\.?s\.?|ph\.?d\.?|associate|diploma)[A-Za-z'’]*[\s:,]*[^\n]*",
    )
    .unwrap()
});

/// Path segment after a profile-host match, reduced to word characters.
fn profile_handle(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .map(|cap| NON_WORD.replace_all(&cap[1], "").into_owned())
        .filter(|handle| !handle.is_empty())
}

fn labelled_values(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .map(|cap| cap[1].trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

pub fn parse_text(text: &str) -> ParsedResumeData {
    let mut data = ParsedResumeData::default();

    if let Some(m) = EMAIL.find(text) {
        data.email = m.as_str().to_string();
    }

    if let Some(m) = PHONE.find(text) {
        data.phone_number = PHONE_NOISE.replace_all(m.as_str(), "").into_owned();
    }

    if let Some(handle) = profile_handle(&GITHUB, text) {
        data.github_url = format!("https://github.com/{handle}");
    }
    if let Some(handle) = profile_handle(&LINKEDIN, text) {
        data.linkedin_url = format!("https://linkedin.com/in/{handle}");
    }

    if let Some(name_line) = text.lines().map(str::trim).find(|line| !line.is_empty()) {
        let mut parts = name_line.split_whitespace();
        if let Some(first) = parts.next() {
            data.first_name = first.to_string();
        }
        data.last_name = parts.collect::<Vec<_>>().join(" ");
    }

    let lower = text.to_lowercase();
    data.skills = SKILL_KEYWORDS
        .iter()
        .filter(|skill| lower.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect();

    let titles = labelled_values(&JOB_TITLE_LABEL, text);
    let companies = labelled_values(&COMPANY_LABEL, text);
    data.work_experience = titles
        .into_iter()
        .enumerate()
        .map(|(i, job_title)| WorkExperience {
            job_title,
            company_name: companies.get(i).cloned().unwrap_or_default(),
            ..Default::default()
        })
        .collect();

    data.education = DEGREE_LABEL
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|degree| !degree.is_empty())
        .map(|degree| Education {
            degree,
            ..Default::default()
        })
        .collect();

    data
}
