//! Job search workflow: filter fingerprinting, the TTL posting cache, the
//! resume match scoring pipeline, score-band aggregation, and the HTTP
//! surface that ties them together.

pub mod aggregate;
pub mod cache;
pub mod domain;
pub mod fingerprint;
pub mod profile;
pub mod providers;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{best_matches, filter_by_band};
pub use cache::JobCache;
pub use domain::{
    DatePostedFilter, JobFilter, JobPosting, JobType, MatchBadge, ResumeProfile, ScoreBand,
    ScoredJob, WorkMode,
};
pub use fingerprint::fingerprint;
pub use profile::ResumeProfileStore;
pub use providers::{
    ExplainRequest, ExplanationProvider, JobSource, OpenAiEmbeddings, OpenAiExplanations,
    ProviderError, RemotiveSource, SimilarityProvider, SourceError,
};
pub use router::{job_router, resume_router};
pub use scoring::{MatchEngine, NoNoise, ScoreNoise, SeededNoise};
pub use service::{JobSearchService, SearchError, SearchOutcome};
