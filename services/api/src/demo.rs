use crate::infra::{InMemoryApplicationRepository, InMemoryResumeProfileStore, StaticJobSource};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use jobscout::config::MatchingConfig;
use jobscout::error::AppError;
use jobscout::workflows::applications::{ApplicationTracker, NewApplication};
use jobscout::workflows::search::{
    JobCache, JobFilter, JobSearchService, MatchEngine, ResumeProfileStore, ScoreBand,
};

const SAMPLE_RESUME: &str = "Backend engineer with six years of experience building services \
in Rust and Go. Comfortable with PostgreSQL, Docker, and Kubernetes. Previously shipped data \
pipelines in Python and SQL.";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Resume text file to score against (defaults to a built-in sample)
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
    /// Search query applied to the seeded postings
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Skip the application tracking portion of the demo
    #[arg(long)]
    pub(crate) skip_applications: bool,
}

/// Walks the search and application workflows against seeded postings, with
/// keyword scoring so no network or API key is needed.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let resume_text = match &args.resume {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_RESUME.to_string(),
    };

    let profiles = Arc::new(InMemoryResumeProfileStore::default());
    profiles.set_resume("demo-user", resume_text, "resume.txt".to_string());

    let engine = Arc::new(MatchEngine::new(MatchingConfig::default(), None, None));
    let service = JobSearchService::new(
        Arc::new(StaticJobSource::seeded()),
        Arc::new(JobCache::new(Duration::from_secs(900))),
        profiles,
        engine,
        MatchingConfig::default().best_matches_limit,
    );

    let filter = JobFilter {
        query: args.query.clone().unwrap_or_default(),
        ..JobFilter::default()
    };
    let outcome = service
        .search("demo-user", &filter, ScoreBand::All)
        .await
        .map_err(AppError::Search)?;

    println!("Job search demo ({} postings)", outcome.total);
    for job in &outcome.jobs {
        println!(
            "- [{:>3}] {} @ {} ({})",
            job.match_score, job.posting.title, job.posting.company, job.posting.location
        );
        println!("        {}", job.match_explanation);
    }

    println!("\nBest matches:");
    for job in &outcome.best_matches {
        println!("- [{:>3}] {}", job.match_score, job.posting.title);
    }

    if args.skip_applications {
        return Ok(());
    }

    let Some(top) = outcome.best_matches.first() else {
        return Ok(());
    };

    println!("\nApplication tracking demo");
    let tracker = ApplicationTracker::new(Arc::new(InMemoryApplicationRepository::default()));
    let application = tracker
        .create(
            "demo-user",
            NewApplication {
                job_id: top.posting.id.clone(),
                job_title: top.posting.title.clone(),
                company: top.posting.company.clone(),
                location: top.posting.location.clone(),
                apply_url: top.posting.apply_url.clone(),
                match_score: top.match_score,
            },
        )
        .await
        .map_err(AppError::Applications)?;
    let application = tracker
        .update_status(&application.id, "interview", Some("Recruiter call booked".to_owned()))
        .await
        .map_err(AppError::Applications)?;
    let application = tracker
        .update_status(&application.id, "offer", None)
        .await
        .map_err(AppError::Applications)?;

    println!(
        "Application {} for '{}' is now {}",
        application.id.0, application.job_title, application.status
    );
    println!("Timeline:");
    for entry in &application.timeline {
        println!(
            "- {} | {} | {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.status,
            entry.note
        );
    }

    Ok(())
}
