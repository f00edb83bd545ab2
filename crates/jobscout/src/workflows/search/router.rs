use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DatePostedFilter, JobFilter, JobType, ScoreBand, WorkMode};
use super::profile::ResumeProfileStore;
use super::providers::JobSource;
use super::service::{JobSearchService, SearchError};

/// Caller identity comes from the session layer, which lives outside this
/// crate; it hands us the resolved user id in a header.
pub(crate) fn owner_id(headers: &HeaderMap) -> String {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("demo-user")
        .to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobSearchParams {
    #[serde(default)]
    query: String,
    /// Comma-separated skills list.
    #[serde(default)]
    skills: String,
    #[serde(default)]
    date_posted: DatePostedFilter,
    #[serde(default)]
    job_type: Option<JobType>,
    #[serde(default)]
    work_mode: Option<WorkMode>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    match_score: ScoreBand,
    #[serde(default = "default_page")]
    page: u32,
}

fn default_page() -> u32 {
    1
}

impl JobSearchParams {
    fn into_parts(self) -> (JobFilter, ScoreBand) {
        let skills = self
            .skills
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_string)
            .collect();
        let filter = JobFilter {
            query: self.query,
            skills,
            date_posted: self.date_posted,
            job_type: self.job_type,
            work_mode: self.work_mode,
            location: self.location,
            page: self.page.max(1),
        };
        (filter, self.match_score)
    }
}

/// Router builder for the job search surface.
pub fn job_router<S>(service: Arc<JobSearchService<S>>) -> Router
where
    S: JobSource + 'static,
{
    Router::new()
        .route("/api/v1/jobs", get(search_handler::<S>))
        .with_state(service)
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<JobSearchService<S>>>,
    headers: HeaderMap,
    Query(params): Query<JobSearchParams>,
) -> Response
where
    S: JobSource + 'static,
{
    let user_id = owner_id(&headers);
    let (filter, band) = params.into_parts();

    match service.search(&user_id, &filter, band).await {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(SearchError::Source(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResumeUpload {
    pub(crate) resume_text: String,
    pub(crate) file_name: String,
}

/// Router builder for the resume profile surface. Text extraction from the
/// uploaded document happens upstream; this accepts the extracted text.
pub fn resume_router(profiles: Arc<dyn ResumeProfileStore>) -> Router {
    Router::new()
        .route(
            "/api/v1/resume",
            get(resume_get_handler)
                .post(resume_upload_handler)
                .delete(resume_delete_handler),
        )
        .with_state(profiles)
}

pub(crate) async fn resume_get_handler(
    State(profiles): State<Arc<dyn ResumeProfileStore>>,
    headers: HeaderMap,
) -> Response {
    let user_id = owner_id(&headers);
    match profiles.get(&user_id) {
        Some(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        None => {
            let payload = json!({ "error": "no resume on file" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn resume_upload_handler(
    State(profiles): State<Arc<dyn ResumeProfileStore>>,
    headers: HeaderMap,
    axum::Json(upload): axum::Json<ResumeUpload>,
) -> Response {
    if upload.resume_text.trim().is_empty() {
        let payload = json!({ "error": "resume text must not be empty" });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let user_id = owner_id(&headers);
    profiles.set_resume(&user_id, upload.resume_text, upload.file_name);
    (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response()
}

pub(crate) async fn resume_delete_handler(
    State(profiles): State<Arc<dyn ResumeProfileStore>>,
    headers: HeaderMap,
) -> Response {
    let user_id = owner_id(&headers);
    profiles.clear_resume(&user_id);
    (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response()
}
