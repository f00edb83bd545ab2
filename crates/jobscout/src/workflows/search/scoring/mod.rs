//! The resume-to-job scoring pipeline.
//!
//! One of two interchangeable strategies is selected once at construction:
//! semantic (embedding cosine similarity) when a similarity provider is
//! injected, otherwise the lexical keyword-overlap fallback. Provider failures
//! never escape `score_all`; they degrade per job to the lexical strategy and
//! to templated explanations.

mod lexical;
mod semantic;

pub use lexical::{NoNoise, ScoreNoise, SeededNoise};

use std::sync::Arc;

use futures::StreamExt;
use tracing::warn;

use crate::config::MatchingConfig;

use super::domain::{JobPosting, MatchBadge, ScoredJob};
use super::providers::{ExplainRequest, ExplanationProvider, ProviderError, SimilarityProvider};

use semantic::{similarity_score, truncate_chars};

/// Shown when the user has not uploaded a resume yet.
const NO_RESUME_NOTICE: &str = "Upload a resume to see match scores";

enum Strategy {
    Semantic(Arc<dyn SimilarityProvider>),
    Lexical,
}

/// Annotates postings with a match score, badge, and explanation.
pub struct MatchEngine {
    strategy: Strategy,
    explainer: Option<Arc<dyn ExplanationProvider>>,
    noise: Arc<dyn ScoreNoise>,
    settings: MatchingConfig,
}

impl MatchEngine {
    /// Builds the engine from injected capabilities. The strategy choice is
    /// made here, once, and never revisited per call.
    pub fn new(
        settings: MatchingConfig,
        similarity: Option<Arc<dyn SimilarityProvider>>,
        explainer: Option<Arc<dyn ExplanationProvider>>,
    ) -> Self {
        let strategy = match similarity {
            Some(provider) => Strategy::Semantic(provider),
            None => Strategy::Lexical,
        };
        Self {
            strategy,
            explainer,
            noise: Arc::new(SeededNoise),
            settings,
        }
    }

    /// Replaces the lexical perturbation source (tests pass [`NoNoise`]).
    pub fn with_noise(mut self, noise: Arc<dyn ScoreNoise>) -> Self {
        self.noise = noise;
        self
    }

    pub fn is_semantic(&self) -> bool {
        matches!(self.strategy, Strategy::Semantic(_))
    }

    /// Scores every posting against the resume. Total: the output always has
    /// one entry per input, in input order, and no failure mode.
    pub async fn score_all(
        &self,
        jobs: &[JobPosting],
        resume_text: Option<&str>,
    ) -> Vec<ScoredJob> {
        let Some(resume) = resume_text.filter(|text| !text.trim().is_empty()) else {
            return jobs.iter().map(|job| self.unscored(job)).collect();
        };

        match &self.strategy {
            Strategy::Lexical => jobs.iter().map(|job| self.lexical(job, resume)).collect(),
            Strategy::Semantic(provider) => {
                self.semantic_batch(provider.as_ref(), jobs, resume).await
            }
        }
    }

    fn unscored(&self, job: &JobPosting) -> ScoredJob {
        annotate(job, 0, NO_RESUME_NOTICE.to_string())
    }

    fn lexical(&self, job: &JobPosting, resume: &str) -> ScoredJob {
        let score = lexical::lexical_score(job, resume, self.noise.as_ref());
        annotate(job, score, template_explanation(score))
    }

    async fn semantic_batch(
        &self,
        provider: &dyn SimilarityProvider,
        jobs: &[JobPosting],
        resume: &str,
    ) -> Vec<ScoredJob> {
        let resume_excerpt = truncate_chars(resume, self.settings.resume_embed_limit);
        let resume_embedding = match self.timed_embed(provider, resume_excerpt).await {
            Ok(vector) => vector,
            Err(error) => {
                warn!(%error, "resume embedding unavailable, scoring batch lexically");
                return jobs.iter().map(|job| self.lexical(job, resume)).collect();
            }
        };

        // Bounded fan-out; `buffered` keeps completion in input order. The
        // futures are materialized up front so the stream holds plain values.
        let per_job: Vec<_> = jobs
            .iter()
            .map(|job| self.semantic_one(provider, job, &resume_embedding, resume))
            .collect();
        futures::stream::iter(per_job)
            .buffered(self.settings.scoring_fan_out.max(1))
            .collect()
            .await
    }

    async fn semantic_one(
        &self,
        provider: &dyn SimilarityProvider,
        job: &JobPosting,
        resume_embedding: &[f32],
        resume: &str,
    ) -> ScoredJob {
        let job_text = format!("{} {}", job.title, job.description);
        let excerpt = truncate_chars(&job_text, self.settings.job_embed_limit);

        match self.timed_embed(provider, excerpt).await {
            Ok(job_embedding) => {
                let score = similarity_score(resume_embedding, &job_embedding);
                let explanation = self.explanation_for(job, resume, score).await;
                annotate(job, score, explanation)
            }
            Err(error) => {
                warn!(job_id = %job.id, %error, "job embedding failed, falling back to lexical");
                self.lexical(job, resume)
            }
        }
    }

    async fn timed_embed(
        &self,
        provider: &dyn SimilarityProvider,
        text: &str,
    ) -> Result<Vec<f32>, ProviderError> {
        let timeout = self.settings.provider_timeout;
        tokio::time::timeout(timeout, provider.embed(text))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))?
    }

    /// Notable semantic scores get a provider-written explanation; everything
    /// else, and every provider failure, uses the static template.
    async fn explanation_for(&self, job: &JobPosting, resume: &str, score: u8) -> String {
        if score > self.settings.notable_score_threshold {
            if let Some(explainer) = &self.explainer {
                let request = ExplainRequest {
                    title: &job.title,
                    description: &job.description,
                    resume_text: resume,
                    score,
                };
                match tokio::time::timeout(self.settings.provider_timeout, explainer.explain(request))
                    .await
                {
                    Ok(Ok(text)) => return text,
                    Ok(Err(error)) => {
                        warn!(job_id = %job.id, %error, "explanation provider failed, using template");
                    }
                    Err(_) => {
                        warn!(job_id = %job.id, "explanation provider timed out, using template");
                    }
                }
            }
        }
        template_explanation(score)
    }
}

fn annotate(job: &JobPosting, score: u8, explanation: String) -> ScoredJob {
    ScoredJob {
        posting: job.clone(),
        match_score: score,
        match_badge: MatchBadge::for_score(score),
        match_explanation: explanation,
    }
}

/// Three-tier templated explanation keyed by the same bands as the badge.
fn template_explanation(score: u8) -> String {
    let text = if score > 70 {
        "Strong match! Your skills and experience align well with this role. Key qualifications match the job requirements."
    } else if score >= 40 {
        "Moderate match. Some of your skills are relevant, but additional qualifications may be beneficial."
    } else {
        "Lower match score. This role may require skills or experience not prominently featured in your resume."
    };
    text.to_string()
}
