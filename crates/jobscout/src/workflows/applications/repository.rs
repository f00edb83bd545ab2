use async_trait::async_trait;

use super::domain::{Application, ApplicationId};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("application already exists")]
    Conflict,
    #[error("application not found")]
    NotFound,
    #[error("application store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence seam for tracked applications. The service layer only sees
/// this trait, so in-memory and durable backends are interchangeable.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, application: Application) -> Result<Application, RepositoryError>;

    async fn update(&self, application: Application) -> Result<Application, RepositoryError>;

    async fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;

    async fn find_by_owner_and_job(
        &self,
        owner_user_id: &str,
        job_id: &str,
    ) -> Result<Option<Application>, RepositoryError>;

    async fn list_by_owner(&self, owner_user_id: &str)
        -> Result<Vec<Application>, RepositoryError>;
}
