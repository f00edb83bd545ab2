//! Keyword-overlap scoring used when no similarity provider is configured and
//! as the per-job fallback when an embedding call fails.

use crate::workflows::search::domain::JobPosting;

/// Deterministic perturbation applied on top of the raw lexical score.
///
/// The upstream behavior added unseeded randomness "for variety"; deriving the
/// offset from the job id keeps that variety while making repeated scoring of
/// the same posting stable and testable.
pub trait ScoreNoise: Send + Sync {
    /// Offset in [-10, 10] for the given job id.
    fn offset(&self, job_id: &str) -> i32;
}

/// Default noise source, seeded from the job id via FNV-1a.
pub struct SeededNoise;

impl ScoreNoise for SeededNoise {
    fn offset(&self, job_id: &str) -> i32 {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in job_id.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        (hash % 21) as i32 - 10
    }
}

/// Disables the perturbation entirely; used by tests and reproducible runs.
pub struct NoNoise;

impl ScoreNoise for NoNoise {
    fn offset(&self, _job_id: &str) -> i32 {
        0
    }
}

/// Scores a posting by counting which of its keywords (title words plus listed
/// skills, longer than two characters) appear in the lowercased resume.
pub(crate) fn lexical_score(job: &JobPosting, resume_text: &str, noise: &dyn ScoreNoise) -> u8 {
    let resume_lower = resume_text.to_lowercase();

    let keywords: Vec<String> = job
        .title
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .chain(job.skills.iter().map(|skill| skill.to_lowercase()))
        .filter(|keyword| keyword.len() > 2)
        .collect();

    if keywords.is_empty() {
        return 0;
    }

    let matches = keywords
        .iter()
        .filter(|keyword| resume_lower.contains(keyword.as_str()))
        .count();

    let denominator = keywords.len().min(10);
    let raw = (matches as f32 / denominator as f32 * 100.0).round() as i32;

    (raw + noise.offset(&job.id)).clamp(0, 100) as u8
}
