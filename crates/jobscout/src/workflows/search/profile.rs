use super::domain::ResumeProfile;

/// Per-user resume storage. The scoring path only reads; the mutations back
/// the upload and delete surfaces, whose text extraction happens elsewhere.
pub trait ResumeProfileStore: Send + Sync {
    fn get(&self, user_id: &str) -> Option<ResumeProfile>;
    fn set_resume(&self, user_id: &str, resume_text: String, file_name: String);
    fn clear_resume(&self, user_id: &str);
}
