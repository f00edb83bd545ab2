use std::sync::Arc;

use crate::workflows::applications::domain::ApplicationStatus;
use crate::workflows::applications::service::{
    ApplicationError, ApplicationTracker, TransitionPolicy,
};

use super::common::{new_application, MemoryApplications};

use ApplicationStatus::{Applied, Interview, Offer, Rejected, Withdrawn};

fn strict_tracker() -> ApplicationTracker<MemoryApplications> {
    ApplicationTracker::new(Arc::new(MemoryApplications::default()))
        .with_policy(TransitionPolicy::Strict)
}

#[test]
fn permissive_policy_allows_any_pair() {
    let policy = TransitionPolicy::Permissive;
    assert!(policy.allows(Rejected, Applied));
    assert!(policy.allows(Withdrawn, Interview));
    assert!(policy.allows(Offer, Rejected));
    assert!(policy.allows(Applied, Applied));
}

#[test]
fn strict_policy_follows_lifecycle_graph() {
    let policy = TransitionPolicy::Strict;
    assert!(policy.allows(Applied, Interview));
    assert!(policy.allows(Applied, Rejected));
    assert!(policy.allows(Interview, Offer));
    assert!(policy.allows(Interview, Rejected));

    assert!(!policy.allows(Applied, Offer));
    assert!(!policy.allows(Offer, Interview));
    assert!(!policy.allows(Rejected, Applied));
}

#[test]
fn strict_policy_allows_withdrawing_from_any_state() {
    let policy = TransitionPolicy::Strict;
    for from in [Applied, Interview, Offer, Rejected] {
        assert!(policy.allows(from, Withdrawn), "{from} -> withdrawn");
    }
    assert!(!policy.allows(Withdrawn, Withdrawn));
}

#[tokio::test]
async fn strict_tracker_rejects_skipping_interview() {
    let tracker = strict_tracker();
    let application = tracker
        .create("user-1", new_application("job-1"))
        .await
        .expect("create application");

    let err = tracker
        .update_status(&application.id, "offer", None)
        .await
        .expect_err("applied cannot jump to offer");
    assert!(matches!(
        err,
        ApplicationError::InvalidTransition { from: Applied, to: Offer }
    ));
}

#[tokio::test]
async fn strict_tracker_walks_full_happy_path() {
    let tracker = strict_tracker();
    let application = tracker
        .create("user-1", new_application("job-1"))
        .await
        .expect("create application");

    tracker
        .update_status(&application.id, "interview", None)
        .await
        .expect("to interview");
    let offered = tracker
        .update_status(&application.id, "offer", None)
        .await
        .expect("to offer");

    assert_eq!(offered.status, Offer);
    assert_eq!(offered.timeline.len(), 3);
    assert!(offered.status.is_terminal());
}

#[tokio::test]
async fn permissive_same_status_update_appends_a_note() {
    let tracker = ApplicationTracker::new(Arc::new(MemoryApplications::default()));
    let application = tracker
        .create("user-1", new_application("job-1"))
        .await
        .expect("create application");

    let updated = tracker
        .update_status(&application.id, "applied", Some("Followed up by email".to_owned()))
        .await
        .expect("same-status update is allowed");

    assert_eq!(updated.status, Applied);
    assert_eq!(updated.timeline.len(), 2);
    assert_eq!(updated.timeline[1].note, "Followed up by email");
}

#[tokio::test]
async fn strict_policy_rejects_no_op_transitions() {
    let tracker = strict_tracker();
    let application = tracker
        .create("user-1", new_application("job-1"))
        .await
        .expect("create application");

    let err = tracker
        .update_status(&application.id, "applied", None)
        .await
        .expect_err("same status");
    assert!(matches!(
        err,
        ApplicationError::InvalidTransition { from: Applied, to: Applied }
    ));
}
