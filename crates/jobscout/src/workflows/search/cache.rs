use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::domain::JobPosting;

struct CacheEntry {
    postings: Vec<JobPosting>,
    stored_at: Instant,
}

/// Short-lived cache of job-source results keyed by filter fingerprint.
///
/// Expiry is lazy: an entry past its TTL is treated as absent and dropped the
/// next time its key is read. The cache never talks to the job source; filling
/// it on a miss is the caller's responsibility.
pub struct JobCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl JobCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, fingerprint: &str) -> Option<Vec<JobPosting>> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(fingerprint) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.postings.clone()),
            Some(_) => {
                entries.remove(fingerprint);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, fingerprint: &str, postings: Vec<JobPosting>) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            fingerprint.to_string(),
            CacheEntry {
                postings,
                stored_at: Instant::now(),
            },
        );
    }
}
