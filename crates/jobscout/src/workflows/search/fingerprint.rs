use sha2::{Digest, Sha256};

use super::domain::JobFilter;

/// Derives the cache key for a filter specification.
///
/// Free-text fields are trimmed and lowercased and the skills list is sorted
/// and deduplicated, so two logically identical filters always map to the same
/// key while any recognized field difference changes it.
pub fn fingerprint(filter: &JobFilter) -> String {
    let mut skills: Vec<String> = filter
        .skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect();
    skills.sort();
    skills.dedup();

    let canonical = serde_json::json!({
        "query": filter.query.trim().to_lowercase(),
        "skills": skills,
        "date_posted": filter.date_posted,
        "job_type": filter.job_type,
        "work_mode": filter.work_mode,
        "location": filter.location.trim().to_lowercase(),
        "page": filter.page,
    });

    hex::encode(Sha256::digest(canonical.to_string().as_bytes()))
}
