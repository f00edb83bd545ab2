use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::workflows::applications::domain::{Application, ApplicationId, NewApplication};
use crate::workflows::applications::repository::{ApplicationRepository, RepositoryError};
use crate::workflows::applications::service::ApplicationTracker;

/// In-memory repository backing the workflow tests.
#[derive(Default)]
pub(super) struct MemoryApplications {
    records: Mutex<HashMap<ApplicationId, Application>>,
}

#[async_trait]
impl ApplicationRepository for MemoryApplications {
    async fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut records = self.records.lock().expect("application mutex poisoned");
        if records.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        records.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    async fn update(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut records = self.records.lock().expect("application mutex poisoned");
        if !records.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        records.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    async fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("application mutex poisoned")
            .get(id)
            .cloned())
    }

    async fn find_by_owner_and_job(
        &self,
        owner_user_id: &str,
        job_id: &str,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("application mutex poisoned")
            .values()
            .find(|app| app.owner_user_id == owner_user_id && app.job_id == job_id)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner_user_id: &str,
    ) -> Result<Vec<Application>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("application mutex poisoned")
            .values()
            .filter(|app| app.owner_user_id == owner_user_id)
            .cloned()
            .collect())
    }
}

/// Repository whose mutations always fail, for surfacing storage errors.
pub(super) struct BrokenApplications;

#[async_trait]
impl ApplicationRepository for BrokenApplications {
    async fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_owned()))
    }

    async fn update(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_owned()))
    }

    async fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_owned()))
    }

    async fn find_by_owner_and_job(
        &self,
        _owner_user_id: &str,
        _job_id: &str,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_owned()))
    }

    async fn list_by_owner(
        &self,
        _owner_user_id: &str,
    ) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_owned()))
    }
}

pub(super) fn new_application(job_id: &str) -> NewApplication {
    NewApplication {
        job_id: job_id.to_owned(),
        job_title: "Rust Backend Engineer".to_owned(),
        company: "Acme".to_owned(),
        location: "Remote".to_owned(),
        apply_url: format!("https://example.com/apply/{job_id}"),
        match_score: 87,
    }
}

pub(super) fn tracker() -> Arc<ApplicationTracker<MemoryApplications>> {
    Arc::new(ApplicationTracker::new(Arc::new(MemoryApplications::default())))
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
