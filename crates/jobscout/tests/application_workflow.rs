//! Integration scenarios for the application tracking workflow.
//!
//! Drives the tracker through its public facade and verifies the lifecycle
//! rules, duplicate protection, and timeline audit trail.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use jobscout::workflows::applications::{
        Application, ApplicationId, ApplicationRepository, ApplicationTracker, NewApplication,
        RepositoryError,
    };

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

        async fn fetch(
            &self,
            id: &ApplicationId,
        ) -> Result<Option<Application>, RepositoryError> {
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

    pub(super) fn tracker() -> ApplicationTracker<MemoryApplications> {
        ApplicationTracker::new(Arc::new(MemoryApplications::default()))
    }

    pub(super) fn submission(job_id: &str) -> NewApplication {
        NewApplication {
            job_id: job_id.to_owned(),
            job_title: "Rust Backend Engineer".to_owned(),
            company: "Acme".to_owned(),
            location: "Remote".to_owned(),
            apply_url: format!("https://example.com/apply/{job_id}"),
            match_score: 92,
        }
    }
}

use jobscout::workflows::applications::{
    ApplicationError, ApplicationStatus, TransitionPolicy,
};

use common::{submission, tracker};

#[tokio::test]
async fn full_lifecycle_keeps_a_complete_timeline() {
    let tracker = tracker();

    let application = tracker
        .create("user-1", submission("job-1"))
        .await
        .expect("create");
    tracker
        .update_status(&application.id, "interview", None)
        .await
        .expect("to interview");
    let offered = tracker
        .update_status(&application.id, "offer", Some("Verbal offer".to_owned()))
        .await
        .expect("to offer");

    assert_eq!(offered.status, ApplicationStatus::Offer);
    let statuses: Vec<_> = offered.timeline.iter().map(|entry| entry.status).collect();
    assert_eq!(
        statuses,
        vec![
            ApplicationStatus::Applied,
            ApplicationStatus::Interview,
            ApplicationStatus::Offer,
        ]
    );
    assert_eq!(offered.timeline[2].note, "Verbal offer");
}

#[tokio::test]
async fn duplicate_application_is_rejected_per_owner() {
    let tracker = tracker();

    tracker
        .create("user-1", submission("job-1"))
        .await
        .expect("first");
    let err = tracker
        .create("user-1", submission("job-1"))
        .await
        .expect_err("duplicate");
    assert!(matches!(err, ApplicationError::Conflict { .. }));

    tracker
        .create("user-2", submission("job-1"))
        .await
        .expect("other owner can still apply");
}

#[tokio::test]
async fn strict_policy_blocks_reopening_a_rejection() {
    let tracker = tracker().with_policy(TransitionPolicy::Strict);

    let application = tracker
        .create("user-1", submission("job-1"))
        .await
        .expect("create");
    tracker
        .update_status(&application.id, "rejected", None)
        .await
        .expect("reject");

    let err = tracker
        .update_status(&application.id, "interview", None)
        .await
        .expect_err("terminal state");
    assert!(matches!(err, ApplicationError::InvalidTransition { .. }));

    tracker
        .update_status(&application.id, "withdrawn", None)
        .await
        .expect("withdrawal is always allowed");
}
