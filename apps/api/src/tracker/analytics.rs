//! Dashboard numbers derived from the tracked applications.
//!
//! Everything here is recomputed from the full list on each request; with at
//! most a hundred records there is nothing worth caching.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::application::{ApplicationRecord, ApplicationStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub count: usize,
}

/// One edge of the application-flow diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: &'static str,
    pub target: &'static str,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total: usize,
    pub by_status: Vec<StatusCount>,
    pub today: usize,
    pub flow: Vec<FlowLink>,
}

/// Counts per status in board order, zeros included.
pub fn status_counts(records: &[ApplicationRecord]) -> Vec<StatusCount> {
    ApplicationStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: records.iter().filter(|r| r.status == status).count(),
        })
        .collect()
}

/// Records whose timestamp falls on the same UTC date as `now`.
pub fn applied_today(records: &[ApplicationRecord], now: DateTime<Utc>) -> usize {
    let today = now.date_naive();
    records
        .iter()
        .filter(|r| r.timestamp.date_naive() == today)
        .count()
}

pub fn flow_links(records: &[ApplicationRecord]) -> Vec<FlowLink> {
    let count = |status: ApplicationStatus| records.iter().filter(|r| r.status == status).count();
    let screen = count(ApplicationStatus::Screen);
    let interviewing = count(ApplicationStatus::Interviewing);
    let offer = count(ApplicationStatus::Offer);
    let rejected = count(ApplicationStatus::Rejected);

    let link = |source, target, value| FlowLink {
        source,
        target,
        value,
    };

    vec![
        link("Start", "Applied", records.len()),
        link("Applied", "Screen", screen),
        link("Applied", "Rejected", rejected),
        link("Screen", "Interviewing", interviewing),
        link("Interviewing", "Accepted", offer),
        link("Interviewing", "Rejected", interviewing.saturating_sub(offer)),
        link("Accepted", "On Call", offer),
    ]
}

pub fn summarize(records: &[ApplicationRecord], now: DateTime<Utc>) -> AnalyticsSummary {
    AnalyticsSummary {
        total: records.len(),
        by_status: status_counts(records),
        today: applied_today(records, now),
        flow: flow_links(records),
    }
}
