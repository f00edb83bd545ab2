//! Remotive job board adapter. The public API needs no key and only serves
//! remote roles, so work-mode filtering is intentionally relaxed: filtering
//! remote-only inventory down to "onsite" would always return nothing.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::workflows::search::domain::{DatePostedFilter, JobFilter, JobPosting, JobType, WorkMode};

use super::{JobSource, SourceError};

const REMOTIVE_API_URL: &str = "https://remotive.com/api/remote-jobs";

/// Page size applied after client-side filtering.
pub const REMOTIVE_PAGE_SIZE: usize = 20;

pub struct RemotiveSource {
    client: Client,
    api_url: String,
}

impl RemotiveSource {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url: REMOTIVE_API_URL.to_string(),
        })
    }

    /// Points the adapter at a different endpoint, used by tests and mirrors.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[derive(Deserialize)]
struct RemotiveResponse {
    jobs: Vec<RemotiveJob>,
}

#[derive(Deserialize)]
struct RemotiveJob {
    id: u64,
    url: String,
    title: String,
    company_name: String,
    #[serde(default)]
    candidate_required_location: String,
    #[serde(default)]
    job_type: Option<String>,
    #[serde(default)]
    publication_date: String,
    #[serde(default)]
    salary: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[async_trait]
impl JobSource for RemotiveSource {
    async fn fetch(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, SourceError> {
        let mut request = self.client.get(&self.api_url);
        let query = filter.query.trim();
        if !query.is_empty() {
            request = request.query(&[("search", query)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
            });
        }

        let payload: RemotiveResponse = response.json().await?;
        let postings: Vec<JobPosting> = payload
            .jobs
            .into_iter()
            .map(map_job)
            .filter(|posting| matches_filter(posting, filter))
            .collect();

        Ok(paginate(postings, filter.page))
    }
}

fn map_job(job: RemotiveJob) -> JobPosting {
    JobPosting {
        id: format!("remotive-{}", job.id),
        title: job.title,
        company: job.company_name,
        location: if job.candidate_required_location.is_empty() {
            "Worldwide".to_string()
        } else {
            job.candidate_required_location
        },
        description: job.description,
        job_type: map_job_type(job.job_type.as_deref()),
        work_mode: WorkMode::Remote,
        salary: job.salary.filter(|salary| !salary.trim().is_empty()),
        posted_at: parse_publication_date(&job.publication_date),
        apply_url: job.url,
        skills: job.tags,
    }
}

fn map_job_type(raw: Option<&str>) -> JobType {
    match raw {
        None => JobType::FullTime,
        Some(value) => {
            let value = value.to_lowercase();
            if value.contains("part_time") {
                JobType::PartTime
            } else if value.contains("contract") || value.contains("freelance") {
                JobType::Contract
            } else if value.contains("internship") {
                JobType::Internship
            } else {
                JobType::FullTime
            }
        }
    }
}

fn parse_publication_date(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|naive| naive.and_utc())
        })
        .unwrap_or_else(|_| Utc::now())
}

/// Client-side pass over the fields the Remotive API ignores.
fn matches_filter(posting: &JobPosting, filter: &JobFilter) -> bool {
    let query = filter.query.trim().to_lowercase();
    if !query.is_empty()
        && !posting.title.to_lowercase().contains(&query)
        && !posting.company.to_lowercase().contains(&query)
        && !posting.description.to_lowercase().contains(&query)
    {
        return false;
    }

    let location = filter.location.trim().to_lowercase();
    if !location.is_empty() {
        let job_location = posting.location.to_lowercase();
        let anywhere = ["worldwide", "anywhere", "global", "remote"]
            .iter()
            .any(|alias| job_location.contains(alias));
        if !job_location.contains(&location) && !anywhere {
            return false;
        }
    }

    if let Some(job_type) = filter.job_type {
        if posting.job_type != job_type {
            return false;
        }
    }

    match filter.date_posted {
        DatePostedFilter::Any => true,
        DatePostedFilter::Last24h => posted_within_days(posting, 1),
        DatePostedFilter::LastWeek => posted_within_days(posting, 7),
        DatePostedFilter::LastMonth => posted_within_days(posting, 30),
    }
}

// Hour precision: `num_days` floors, which would stretch a 24h window to
// anything under 48h.
fn posted_within_days(posting: &JobPosting, days: i64) -> bool {
    Utc::now()
        .signed_duration_since(posting.posted_at)
        .num_hours()
        <= days * 24
}

fn paginate(postings: Vec<JobPosting>, page: u32) -> Vec<JobPosting> {
    let page = page.max(1) as usize;
    postings
        .into_iter()
        .skip((page - 1) * REMOTIVE_PAGE_SIZE)
        .take(REMOTIVE_PAGE_SIZE)
        .collect()
}
