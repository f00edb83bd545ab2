use std::sync::Arc;

use serde::Serialize;

use super::aggregate::{best_matches, filter_by_band};
use super::cache::JobCache;
use super::domain::{JobFilter, ScoreBand, ScoredJob};
use super::fingerprint::fingerprint;
use super::profile::ResumeProfileStore;
use super::providers::{JobSource, SourceError};
use super::scoring::MatchEngine;

/// Facade composing the cache, job source, resume store, scoring engine, and
/// aggregation into the single search flow the HTTP surface consumes.
pub struct JobSearchService<S> {
    source: Arc<S>,
    cache: Arc<JobCache>,
    profiles: Arc<dyn ResumeProfileStore>,
    engine: Arc<MatchEngine>,
    best_matches_limit: usize,
}

/// The scored feed for one search plus the band-independent best matches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub jobs: Vec<ScoredJob>,
    pub best_matches: Vec<ScoredJob>,
    pub total: usize,
    pub page: u32,
}

impl<S> JobSearchService<S>
where
    S: JobSource + 'static,
{
    pub fn new(
        source: Arc<S>,
        cache: Arc<JobCache>,
        profiles: Arc<dyn ResumeProfileStore>,
        engine: Arc<MatchEngine>,
        best_matches_limit: usize,
    ) -> Self {
        Self {
            source,
            cache,
            profiles,
            engine,
            best_matches_limit,
        }
    }

    /// Runs one search: cache lookup (miss delegates to the source and fills
    /// the cache), scoring against the caller's resume, then aggregation.
    /// The band is applied after scoring and never feeds the cache key.
    pub async fn search(
        &self,
        user_id: &str,
        filter: &JobFilter,
        band: ScoreBand,
    ) -> Result<SearchOutcome, SearchError> {
        let key = fingerprint(filter);
        let postings = match self.cache.get(&key) {
            Some(postings) => postings,
            None => {
                let fetched = self.source.fetch(filter).await?;
                self.cache.put(&key, fetched.clone());
                fetched
            }
        };

        let resume = self
            .profiles
            .get(user_id)
            .and_then(|profile| profile.resume_text);
        let scored = self.engine.score_all(&postings, resume.as_deref()).await;

        let best_matches = best_matches(&scored, self.best_matches_limit);
        let jobs = filter_by_band(scored, band);

        Ok(SearchOutcome {
            total: jobs.len(),
            page: filter.page,
            jobs,
            best_matches,
        })
    }
}

/// Failure of the search flow as a whole. Scoring degradations never appear
/// here; only an unusable job source does.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Source(#[from] SourceError),
}
