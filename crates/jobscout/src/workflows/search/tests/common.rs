use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::workflows::search::cache::JobCache;
use crate::workflows::search::domain::{
    JobFilter, JobPosting, JobType, ResumeProfile, WorkMode,
};
use crate::workflows::search::profile::ResumeProfileStore;
use crate::workflows::search::providers::{JobSource, SourceError};
use crate::workflows::search::scoring::{MatchEngine, NoNoise};
use crate::workflows::search::service::JobSearchService;

pub(super) fn posting(id: &str, title: &str, skills: &[&str]) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        title: title.to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        description: "Build and run production services".to_string(),
        job_type: JobType::FullTime,
        work_mode: WorkMode::Remote,
        salary: Some("$120k".to_string()),
        posted_at: Utc::now(),
        apply_url: format!("https://example.com/apply/{id}"),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

pub(super) fn sample_postings() -> Vec<JobPosting> {
    vec![
        posting("job-1", "Rust Backend Engineer", &["Rust", "Tokio"]),
        posting("job-2", "React Developer", &["React", "TypeScript"]),
        posting("job-3", "Data Analyst", &["SQL", "Python"]),
    ]
}

/// Job source serving a fixed list while counting fetches, so tests can
/// observe cache hits versus misses.
pub(super) struct CountingSource {
    postings: Vec<JobPosting>,
    pub(super) fetches: Mutex<u32>,
}

impl CountingSource {
    pub(super) fn new(postings: Vec<JobPosting>) -> Self {
        Self {
            postings,
            fetches: Mutex::new(0),
        }
    }

    pub(super) fn fetch_count(&self) -> u32 {
        *self.fetches.lock().expect("fetch counter mutex poisoned")
    }
}

#[async_trait]
impl JobSource for CountingSource {
    async fn fetch(&self, _filter: &JobFilter) -> Result<Vec<JobPosting>, SourceError> {
        *self.fetches.lock().expect("fetch counter mutex poisoned") += 1;
        Ok(self.postings.clone())
    }
}

/// Job source that is always down.
pub(super) struct UnavailableSource;

#[async_trait]
impl JobSource for UnavailableSource {
    async fn fetch(&self, _filter: &JobFilter) -> Result<Vec<JobPosting>, SourceError> {
        Err(SourceError::Api { status: 503 })
    }
}

#[derive(Default)]
pub(super) struct MemoryProfiles {
    profiles: Mutex<HashMap<String, ResumeProfile>>,
}

impl MemoryProfiles {
    pub(super) fn with_resume(user_id: &str, resume_text: &str) -> Self {
        let store = Self::default();
        store.set_resume(user_id, resume_text.to_string(), "resume.pdf".to_string());
        store
    }
}

impl ResumeProfileStore for MemoryProfiles {
    fn get(&self, user_id: &str) -> Option<ResumeProfile> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .get(user_id)
            .cloned()
    }

    fn set_resume(&self, user_id: &str, resume_text: String, file_name: String) {
        self.profiles.lock().expect("profile mutex poisoned").insert(
            user_id.to_string(),
            ResumeProfile {
                user_id: user_id.to_string(),
                resume_text: Some(resume_text),
                file_name: Some(file_name),
            },
        );
    }

    fn clear_resume(&self, user_id: &str) {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .remove(user_id);
    }
}

pub(super) fn lexical_engine() -> Arc<MatchEngine> {
    Arc::new(MatchEngine::new(MatchingConfig::default(), None, None).with_noise(Arc::new(NoNoise)))
}

pub(super) fn build_service(
    source: Arc<CountingSource>,
    profiles: Arc<MemoryProfiles>,
) -> JobSearchService<CountingSource> {
    JobSearchService::new(
        source,
        Arc::new(JobCache::new(Duration::from_secs(900))),
        profiles,
        lexical_engine(),
        8,
    )
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
