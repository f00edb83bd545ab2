use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized posting produced by a job source adapter. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free text, may contain markup straight from the source.
    pub description: String,
    pub job_type: JobType,
    pub work_mode: WorkMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub apply_url: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "full-time", alias = "fulltime")]
    FullTime,
    #[serde(rename = "part-time", alias = "parttime")]
    PartTime,
    #[serde(rename = "contract")]
    Contract,
    #[serde(rename = "internship")]
    Internship,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkMode {
    pub const fn label(self) -> &'static str {
        match self {
            WorkMode::Remote => "remote",
            WorkMode::Hybrid => "hybrid",
            WorkMode::Onsite => "onsite",
        }
    }
}

/// The full filter specification for a job search. All recognized fields feed
/// the cache fingerprint; the score band does not and lives outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFilter {
    pub query: String,
    pub skills: Vec<String>,
    pub date_posted: DatePostedFilter,
    pub job_type: Option<JobType>,
    pub work_mode: Option<WorkMode>,
    pub location: String,
    pub page: u32,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            skills: Vec::new(),
            date_posted: DatePostedFilter::Any,
            job_type: None,
            work_mode: None,
            location: String::new(),
            page: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatePostedFilter {
    #[default]
    Any,
    Last24h,
    LastWeek,
    LastMonth,
}

/// Three-tier coarse classification derived from the match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchBadge {
    Green,
    Yellow,
    Gray,
}

impl MatchBadge {
    /// The single badge band rule shared by every scoring strategy.
    pub const fn for_score(score: u8) -> Self {
        if score > 70 {
            MatchBadge::Green
        } else if score >= 40 {
            MatchBadge::Yellow
        } else {
            MatchBadge::Gray
        }
    }
}

/// A posting annotated by the scoring engine. Derived, never stored on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredJob {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub match_score: u8,
    pub match_badge: MatchBadge,
    pub match_explanation: String,
}

/// Score-band filter applied to the scored feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    #[default]
    All,
    High,
    Medium,
}

/// Per-user resume snapshot consumed read-only by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProfile {
    pub user_id: String,
    pub resume_text: Option<String>,
    pub file_name: Option<String>,
}
