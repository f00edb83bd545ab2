use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

use jobscout::workflows::applications::{
    Application, ApplicationId, ApplicationRepository, RepositoryError,
};
use jobscout::workflows::search::{
    JobFilter, JobPosting, JobSource, JobType, ResumeProfile, ResumeProfileStore, SourceError,
    WorkMode,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    async fn update(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    async fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn find_by_owner_and_job(
        &self,
        owner_user_id: &str,
        job_id: &str,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|app| app.owner_user_id == owner_user_id && app.job_id == job_id)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner_user_id: &str,
    ) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|app| app.owner_user_id == owner_user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryResumeProfileStore {
    profiles: Arc<Mutex<HashMap<String, ResumeProfile>>>,
}

impl ResumeProfileStore for InMemoryResumeProfileStore {
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

/// Fixed postings for the offline demo, so it runs without network access.
pub(crate) struct StaticJobSource {
    postings: Vec<JobPosting>,
}

impl StaticJobSource {
    pub(crate) fn seeded() -> Self {
        Self {
            postings: seeded_postings(),
        }
    }
}

#[async_trait]
impl JobSource for StaticJobSource {
    async fn fetch(&self, _filter: &JobFilter) -> Result<Vec<JobPosting>, SourceError> {
        Ok(self.postings.clone())
    }
}

fn seeded_postings() -> Vec<JobPosting> {
    let now = Utc::now();
    vec![
        JobPosting {
            id: "demo-1".to_string(),
            title: "Senior Backend Engineer".to_string(),
            company: "TechFlow".to_string(),
            location: "Worldwide".to_string(),
            description: "Design and operate high-throughput services in Rust and Go. \
                          Experience with PostgreSQL and distributed systems required."
                .to_string(),
            job_type: JobType::FullTime,
            work_mode: WorkMode::Remote,
            salary: Some("$140k - $180k".to_string()),
            posted_at: now - Duration::hours(6),
            apply_url: "https://example.com/jobs/demo-1".to_string(),
            skills: vec!["Rust".to_string(), "Go".to_string(), "PostgreSQL".to_string()],
        },
        JobPosting {
            id: "demo-2".to_string(),
            title: "Frontend Developer".to_string(),
            company: "BrightPixel".to_string(),
            location: "Berlin, Germany".to_string(),
            description: "Build accessible interfaces with React and TypeScript for a \
                          consumer analytics product."
                .to_string(),
            job_type: JobType::FullTime,
            work_mode: WorkMode::Hybrid,
            salary: Some("€70k - €90k".to_string()),
            posted_at: now - Duration::days(2),
            apply_url: "https://example.com/jobs/demo-2".to_string(),
            skills: vec!["React".to_string(), "TypeScript".to_string(), "CSS".to_string()],
        },
        JobPosting {
            id: "demo-3".to_string(),
            title: "Data Engineer".to_string(),
            company: "Datastack".to_string(),
            location: "Worldwide".to_string(),
            description: "Own ingestion pipelines and warehouse modelling. Python, SQL, \
                          and Airflow day to day."
                .to_string(),
            job_type: JobType::Contract,
            work_mode: WorkMode::Remote,
            salary: None,
            posted_at: now - Duration::days(5),
            apply_url: "https://example.com/jobs/demo-3".to_string(),
            skills: vec!["Python".to_string(), "SQL".to_string(), "Airflow".to_string()],
        },
        JobPosting {
            id: "demo-4".to_string(),
            title: "Platform Engineering Intern".to_string(),
            company: "TechFlow".to_string(),
            location: "Austin, TX".to_string(),
            description: "Support the platform team with tooling, CI, and Kubernetes \
                          operations."
                .to_string(),
            job_type: JobType::Internship,
            work_mode: WorkMode::Onsite,
            salary: Some("$30/hr".to_string()),
            posted_at: now - Duration::days(12),
            apply_url: "https://example.com/jobs/demo-4".to_string(),
            skills: vec!["Kubernetes".to_string(), "Docker".to_string(), "Bash".to_string()],
        },
    ]
}
