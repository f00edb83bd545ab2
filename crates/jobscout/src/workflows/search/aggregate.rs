use super::domain::{ScoreBand, ScoredJob};

/// Applies the score-band filter used by the job feed. `All` is the identity;
/// input order is preserved.
pub fn filter_by_band(jobs: Vec<ScoredJob>, band: ScoreBand) -> Vec<ScoredJob> {
    match band {
        ScoreBand::All => jobs,
        ScoreBand::High => jobs
            .into_iter()
            .filter(|job| job.match_score > 70)
            .collect(),
        ScoreBand::Medium => jobs
            .into_iter()
            .filter(|job| (40..=70).contains(&job.match_score))
            .collect(),
    }
}

/// Selects the top-scoring postings from the unfiltered scored set, so the
/// surfaced best matches are independent of the active band filter. The sort
/// is stable: ties keep their input order.
pub fn best_matches(jobs: &[ScoredJob], limit: usize) -> Vec<ScoredJob> {
    let mut ranked = jobs.to_vec();
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked.truncate(limit);
    ranked
}
