use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use jobscout::workflows::applications::{
    application_router, ApplicationRepository, ApplicationTracker,
};
use jobscout::workflows::search::{
    job_router, resume_router, JobSearchService, JobSource, ResumeProfileStore,
};

/// Assembles the full HTTP surface: workflow routers plus the operational
/// endpoints that sit outside any workflow.
pub(crate) fn app_router<S, R>(
    search: Arc<JobSearchService<S>>,
    tracker: Arc<ApplicationTracker<R>>,
    profiles: Arc<dyn ResumeProfileStore>,
) -> axum::Router
where
    S: JobSource + 'static,
    R: ApplicationRepository + 'static,
{
    job_router(search)
        .merge(resume_router(profiles))
        .merge(application_router(tracker))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
