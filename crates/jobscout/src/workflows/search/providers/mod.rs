//! Collaborator contracts consumed by the search workflow: the job source
//! adapter plus the optional semantic similarity and explanation providers.

mod openai;
mod remotive;

pub use openai::{OpenAiEmbeddings, OpenAiExplanations};
pub use remotive::{RemotiveSource, REMOTIVE_PAGE_SIZE};

use std::time::Duration;

use async_trait::async_trait;

use super::domain::{JobFilter, JobPosting};

/// Capability producing embedding vectors for semantic match scoring.
#[async_trait]
pub trait SimilarityProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

/// Inputs for a natural-language match explanation.
#[derive(Debug, Clone, Copy)]
pub struct ExplainRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub resume_text: &'a str,
    pub score: u8,
}

/// Capability writing a short prose explanation for a notable match.
/// Fails independently of embedding; callers degrade to a template.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(&self, request: ExplainRequest<'_>) -> Result<String, ProviderError>;
}

/// Upstream job board adapter. May apply partial server-side filtering.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, SourceError>;
}

/// Transient AI-provider failure. Always absorbed inside the scoring engine.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("provider response missing expected payload")]
    EmptyPayload,
    #[error("provider call exceeded {0:?}")]
    Timeout(Duration),
}

/// Job source failure. Propagated to the search caller since there is nothing
/// to cache or score.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("job source request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("job source returned status {status}")]
    Api { status: u16 },
    #[error("job source payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
