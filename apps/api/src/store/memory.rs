use std::collections::VecDeque;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::application::{ApplicationRecord, ApplicationStatus, APPLICATION_CAP};
use crate::models::detection::DetectedJob;
use crate::models::profile::ProfileRecord;
use crate::store::{ApplicationStore, DetectionStore, ProfileStore};

/// In-process store backing all three repositories, for router and flow tests.
pub struct MemoryStore {
    profile: RwLock<Option<ProfileRecord>>,
    applications: RwLock<VecDeque<ApplicationRecord>>,
    detected_job: RwLock<Option<DetectedJob>>,
    cap: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_cap(APPLICATION_CAP)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            profile: RwLock::new(None),
            applications: RwLock::new(VecDeque::with_capacity(cap)),
            detected_job: RwLock::new(None),
            cap,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self) -> Result<Option<ProfileRecord>> {
        Ok(self.profile.read().await.clone())
    }

    async fn save_profile(&self, profile: &ProfileRecord) -> Result<()> {
        *self.profile.write().await = Some(profile.clone());
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>> {
        Ok(self.applications.read().await.iter().cloned().collect())
    }

    async fn append_application(&self, record: &ApplicationRecord) -> Result<()> {
        let mut applications = self.applications.write().await;
        applications.push_back(record.clone());
        while applications.len() > self.cap {
            applications.pop_front();
        }
        Ok(())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRecord>> {
        let mut applications = self.applications.write().await;
        Ok(applications.iter_mut().find(|a| a.id == id).map(|a| {
            a.status = status;
            a.clone()
        }))
    }
}

#[async_trait]
impl DetectionStore for MemoryStore {
    async fn get_detected_job(&self) -> Result<Option<DetectedJob>> {
        Ok(self.detected_job.read().await.clone())
    }

    async fn set_detected_job(&self, job: &DetectedJob) -> Result<()> {
        *self.detected_job.write().await = Some(job.clone());
        Ok(())
    }

    async fn clear_detected_job(&self) -> Result<()> {
        *self.detected_job.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::NewApplication;
    use chrono::Utc;

    fn record(title: &str) -> ApplicationRecord {
        NewApplication {
            job_title: title.to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        }
        .into_record(Utc::now())
    }

    #[tokio::test]
    async fn test_append_beyond_cap_evicts_oldest() {
        let store = MemoryStore::new();
        for i in 0..(APPLICATION_CAP + 5) {
            store.append_application(&record(&format!("job-{i}"))).await.unwrap();
        }

        let all = store.list_applications().await.unwrap();
        assert_eq!(all.len(), APPLICATION_CAP);
        assert_eq!(all[0].job_title, "job-5");
        assert_eq!(
            all.last().unwrap().job_title,
            format!("job-{}", APPLICATION_CAP + 4)
        );
    }

    #[tokio::test]
    async fn test_length_never_exceeds_small_cap() {
        let store = MemoryStore::with_cap(3);
        for i in 0..10 {
            store.append_application(&record(&i.to_string())).await.unwrap();
            assert!(store.list_applications().await.unwrap().len() <= 3);
        }
        let titles: Vec<String> = store
            .list_applications()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.job_title)
            .collect();
        assert_eq!(titles, vec!["7", "8", "9"]);
    }

    #[tokio::test]
    async fn test_update_status_of_unknown_id_is_none() {
        let store = MemoryStore::new();
        let updated = store
            .update_status(Uuid::new_v4(), ApplicationStatus::Offer)
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_update_status_mutates_in_place() {
        let store = MemoryStore::new();
        let app = record("SRE");
        store.append_application(&app).await.unwrap();

        let updated = store
            .update_status(app.id, ApplicationStatus::Interviewing)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Interviewing);
        assert_eq!(
            store.list_applications().await.unwrap()[0].status,
            ApplicationStatus::Interviewing
        );
    }

    #[tokio::test]
    async fn test_profile_last_write_wins() {
        let store = MemoryStore::new();
        assert!(store.get_profile().await.unwrap().is_none());

        let mut profile = ProfileRecord {
            first_name: "Jane".to_string(),
            ..Default::default()
        };
        store.save_profile(&profile).await.unwrap();
        profile.first_name = "Janet".to_string();
        store.save_profile(&profile).await.unwrap();

        assert_eq!(store.get_profile().await.unwrap().unwrap().first_name, "Janet");
    }
}
