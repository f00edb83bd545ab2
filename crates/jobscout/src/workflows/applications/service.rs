use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, NewApplication, TimelineEntry,
};
use super::repository::{ApplicationRepository, RepositoryError};

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Governs which status transitions `update_status` accepts.
///
/// `Permissive` accepts any status from any status, same-status included, so
/// a caller can re-set the current status just to attach a timeline note.
/// `Strict` enforces the documented lifecycle graph between distinct states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn allows(self, from: ApplicationStatus, to: ApplicationStatus) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => match (from, to) {
                _ if from == to => false,
                (_, ApplicationStatus::Withdrawn) => true,
                (ApplicationStatus::Applied, ApplicationStatus::Interview)
                | (ApplicationStatus::Applied, ApplicationStatus::Rejected)
                | (ApplicationStatus::Interview, ApplicationStatus::Offer)
                | (ApplicationStatus::Interview, ApplicationStatus::Rejected) => true,
                _ => false,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("application not found")]
    NotFound,
    #[error("already applied to this job")]
    Conflict { existing: Box<Application> },
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("cannot move application from {from} to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("application repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Coordinates application creation and status changes over a repository.
pub struct ApplicationTracker<R> {
    repository: Arc<R>,
    policy: TransitionPolicy,
}

impl<R> ApplicationTracker<R>
where
    R: ApplicationRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            policy: TransitionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Records a new application for `owner_user_id`. At most one application
    /// per owner and job: a duplicate returns `Conflict` carrying the
    /// existing record so callers can surface it.
    pub async fn create(
        &self,
        owner_user_id: &str,
        new_application: NewApplication,
    ) -> Result<Application, ApplicationError> {
        if let Some(existing) = self
            .repository
            .find_by_owner_and_job(owner_user_id, &new_application.job_id)
            .await?
        {
            return Err(ApplicationError::Conflict {
                existing: Box::new(existing),
            });
        }

        let now = Utc::now();
        let application = Application {
            id: next_application_id(),
            owner_user_id: owner_user_id.to_owned(),
            job_id: new_application.job_id,
            job_title: new_application.job_title,
            company: new_application.company,
            location: new_application.location,
            apply_url: new_application.apply_url,
            match_score: new_application.match_score,
            status: ApplicationStatus::Applied,
            timeline: vec![TimelineEntry {
                status: ApplicationStatus::Applied,
                timestamp: now,
                note: "Applied to position".to_owned(),
            }],
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(application).await?;
        info!(
            application_id = %stored.id.0,
            job_id = %stored.job_id,
            "application recorded"
        );
        Ok(stored)
    }

    /// Applies a status change, appending a timeline entry. The raw status
    /// string is validated here so transport layers stay thin.
    pub async fn update_status(
        &self,
        id: &ApplicationId,
        status: &str,
        note: Option<String>,
    ) -> Result<Application, ApplicationError> {
        let next = ApplicationStatus::parse(status)
            .ok_or_else(|| ApplicationError::InvalidStatus(status.to_owned()))?;

        let mut application = self
            .repository
            .fetch(id)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        if !self.policy.allows(application.status, next) {
            return Err(ApplicationError::InvalidTransition {
                from: application.status,
                to: next,
            });
        }

        let now = Utc::now();
        application.timeline.push(TimelineEntry {
            status: next,
            timestamp: now,
            note: note.unwrap_or_else(|| format!("Status updated to {next}")),
        });
        application.status = next;
        application.updated_at = now;

        let stored = self.repository.update(application).await?;
        info!(
            application_id = %stored.id.0,
            status = %stored.status,
            "application status updated"
        );
        Ok(stored)
    }

    pub async fn get(&self, id: &ApplicationId) -> Result<Application, ApplicationError> {
        self.repository
            .fetch(id)
            .await?
            .ok_or(ApplicationError::NotFound)
    }

    pub async fn find_by_owner_and_job(
        &self,
        owner_user_id: &str,
        job_id: &str,
    ) -> Result<Option<Application>, ApplicationError> {
        Ok(self
            .repository
            .find_by_owner_and_job(owner_user_id, job_id)
            .await?)
    }

    /// Lists an owner's applications, most recently created first.
    pub async fn list_by_owner(
        &self,
        owner_user_id: &str,
    ) -> Result<Vec<Application>, ApplicationError> {
        let mut applications = self.repository.list_by_owner(owner_user_id).await?;
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }
}
