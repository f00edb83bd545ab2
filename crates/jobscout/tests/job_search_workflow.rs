//! Integration scenarios for the job search workflow.
//!
//! Exercises the public service facade and HTTP router end to end: cached
//! feeds, resume-aware scoring, band filtering, and resume management.

mod common {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use jobscout::config::MatchingConfig;
    use jobscout::workflows::search::{
        JobCache, JobFilter, JobPosting, JobSearchService, JobSource, JobType, MatchEngine,
        NoNoise, ResumeProfile, ResumeProfileStore, SourceError, WorkMode,
    };

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

    pub(super) struct FixedSource {
        postings: Vec<JobPosting>,
        fetches: Mutex<u32>,
    }

    impl FixedSource {
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
    impl JobSource for FixedSource {
        async fn fetch(&self, _filter: &JobFilter) -> Result<Vec<JobPosting>, SourceError> {
            *self.fetches.lock().expect("fetch counter mutex poisoned") += 1;
            Ok(self.postings.clone())
        }
    }

    #[derive(Default)]
    pub(super) struct Profiles {
        inner: Mutex<Option<ResumeProfile>>,
    }

    impl ResumeProfileStore for Profiles {
        fn get(&self, user_id: &str) -> Option<ResumeProfile> {
            self.inner
                .lock()
                .expect("profile mutex poisoned")
                .clone()
                .filter(|profile| profile.user_id == user_id)
        }

        fn set_resume(&self, user_id: &str, resume_text: String, file_name: String) {
            *self.inner.lock().expect("profile mutex poisoned") = Some(ResumeProfile {
                user_id: user_id.to_string(),
                resume_text: Some(resume_text),
                file_name: Some(file_name),
            });
        }

        fn clear_resume(&self, _user_id: &str) {
            *self.inner.lock().expect("profile mutex poisoned") = None;
        }
    }

    pub(super) fn service(
        source: Arc<FixedSource>,
        profiles: Arc<Profiles>,
        cache_ttl: Duration,
    ) -> JobSearchService<FixedSource> {
        let engine =
            MatchEngine::new(MatchingConfig::default(), None, None).with_noise(Arc::new(NoNoise));
        JobSearchService::new(
            source,
            Arc::new(JobCache::new(cache_ttl)),
            profiles,
            Arc::new(engine),
            8,
        )
    }
}

use std::sync::Arc;
use std::time::Duration;

use jobscout::workflows::search::{JobFilter, MatchBadge, ResumeProfileStore, ScoreBand};

use common::{posting, service, FixedSource, Profiles};

const RESUME: &str = "Senior engineer. Skills: Rust, Tokio, SQL.";

fn sources() -> (Arc<FixedSource>, Arc<Profiles>) {
    let source = Arc::new(FixedSource::new(vec![
        posting("job-1", "Rust Backend Engineer", &["Rust", "Tokio"]),
        posting("job-2", "React Developer", &["React", "TypeScript"]),
        posting("job-3", "Data Analyst", &["SQL", "Python"]),
    ]));
    let profiles = Arc::new(Profiles::default());
    (source, profiles)
}

#[tokio::test]
async fn scored_feed_ranks_best_matches_by_resume_overlap() {
    let (source, profiles) = sources();
    profiles.set_resume("user-1", RESUME.to_string(), "resume.pdf".to_string());
    let service = service(source, profiles, Duration::from_secs(900));

    let outcome = service
        .search("user-1", &JobFilter::default(), ScoreBand::All)
        .await
        .expect("search");

    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.best_matches[0].posting.id, "job-1");
    assert_eq!(outcome.best_matches[0].match_badge, MatchBadge::Green);
    assert!(outcome
        .jobs
        .iter()
        .all(|job| !job.match_explanation.is_empty()));
}

#[tokio::test]
async fn repeated_search_is_served_from_cache() {
    let (source, profiles) = sources();
    let service = service(source.clone(), profiles, Duration::from_secs(900));
    let filter = JobFilter {
        query: "engineer".to_string(),
        ..JobFilter::default()
    };

    service
        .search("user-1", &filter, ScoreBand::All)
        .await
        .expect("first search");
    service
        .search("user-1", &filter, ScoreBand::All)
        .await
        .expect("second search");

    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn band_filter_narrows_feed_but_not_best_matches() {
    let (source, profiles) = sources();
    profiles.set_resume("user-1", RESUME.to_string(), "resume.pdf".to_string());
    let service = service(source, profiles, Duration::from_secs(900));

    let outcome = service
        .search("user-1", &JobFilter::default(), ScoreBand::High)
        .await
        .expect("search");

    assert!(outcome.jobs.iter().all(|job| job.match_score > 70));
    assert_eq!(outcome.best_matches.len(), 3);
}

#[tokio::test]
async fn without_resume_every_job_scores_zero_with_notice() {
    let (source, profiles) = sources();
    let service = service(source, profiles, Duration::from_secs(900));

    let outcome = service
        .search("user-1", &JobFilter::default(), ScoreBand::All)
        .await
        .expect("search");

    for job in &outcome.jobs {
        assert_eq!(job.match_score, 0);
        assert_eq!(job.match_badge, MatchBadge::Gray);
        assert_eq!(job.match_explanation, "Upload a resume to see match scores");
    }
}
