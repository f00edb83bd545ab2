use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::workflows::search::router::owner_id;

use super::domain::{ApplicationId, NewApplication};
use super::repository::ApplicationRepository;
use super::service::{ApplicationError, ApplicationTracker};

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// HTTP surface for the application tracker.
pub fn application_router<R>(tracker: Arc<ApplicationTracker<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", get(list_handler).post(create_handler))
        .route("/api/v1/applications/:id", get(get_handler))
        .route("/api/v1/applications/:id/status", patch(status_handler))
        .route("/api/v1/applications/check/:job_id", get(check_handler))
        .with_state(tracker)
}

async fn list_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    headers: HeaderMap,
) -> Response
where
    R: ApplicationRepository,
{
    let owner = owner_id(&headers);
    match tracker.list_by_owner(&owner).await {
        Ok(applications) => Json(applications).into_response(),
        Err(err) => error_response(err),
    }
}

async fn create_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    headers: HeaderMap,
    Json(payload): Json<NewApplication>,
) -> Response
where
    R: ApplicationRepository,
{
    let owner = owner_id(&headers);
    if payload.job_id.trim().is_empty() || payload.job_title.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "jobId and jobTitle are required" })),
        )
            .into_response();
    }
    match tracker.create(&owner, payload).await {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response
where
    R: ApplicationRepository,
{
    let owner = owner_id(&headers);
    match tracker.get(&ApplicationId(id)).await {
        Ok(application) if application.owner_user_id != owner => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "not your application" })),
        )
            .into_response(),
        Ok(application) => Json(application).into_response(),
        Err(err) => error_response(err),
    }
}

async fn status_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    R: ApplicationRepository,
{
    let owner = owner_id(&headers);
    let id = ApplicationId(id);
    // Ownership is checked before the mutation so a foreign id cannot be
    // probed through the status endpoint.
    match tracker.get(&id).await {
        Ok(application) if application.owner_user_id != owner => {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "not your application" })),
            )
                .into_response();
        }
        Ok(_) => {}
        Err(err) => return error_response(err),
    }
    match tracker.update_status(&id, &update.status, update.note).await {
        Ok(application) => Json(application).into_response(),
        Err(err) => error_response(err),
    }
}

async fn check_handler<R>(
    State(tracker): State<Arc<ApplicationTracker<R>>>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
) -> Response
where
    R: ApplicationRepository,
{
    let owner = owner_id(&headers);
    match tracker.find_by_owner_and_job(&owner, &job_id).await {
        Ok(Some(application)) => Json(json!({
            "applied": true,
            "application": application,
        }))
        .into_response(),
        Ok(None) => Json(json!({ "applied": false })).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ApplicationError) -> Response {
    match err {
        ApplicationError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "application not found" })),
        )
            .into_response(),
        ApplicationError::Conflict { existing } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "already applied to this job",
                "application": *existing,
            })),
        )
            .into_response(),
        ApplicationError::InvalidStatus(status) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("invalid status: {status}") })),
        )
            .into_response(),
        ApplicationError::InvalidTransition { from, to } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": format!("cannot move application from {from} to {to}") })),
        )
            .into_response(),
        ApplicationError::Repository(repo) => {
            error!(error = %repo, "application repository failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "application store unavailable" })),
            )
                .into_response()
        }
    }
}
