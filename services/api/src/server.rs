use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository, InMemoryResumeProfileStore};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use jobscout::config::AppConfig;
use jobscout::error::AppError;
use jobscout::telemetry;
use jobscout::workflows::applications::ApplicationTracker;
use jobscout::workflows::search::{
    ExplanationProvider, JobCache, JobSearchService, MatchEngine, OpenAiEmbeddings,
    OpenAiExplanations, RemotiveSource, SimilarityProvider,
};
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = Arc::new(build_engine(&config));
    let source = RemotiveSource::new(config.matching.provider_timeout)
        .map_err(|err| AppError::Search(err.into()))?;
    let profiles = Arc::new(InMemoryResumeProfileStore::default());
    let search = Arc::new(JobSearchService::new(
        Arc::new(source),
        Arc::new(JobCache::new(config.cache.ttl)),
        profiles.clone(),
        engine,
        config.matching.best_matches_limit,
    ));
    let tracker = Arc::new(ApplicationTracker::new(Arc::new(
        InMemoryApplicationRepository::default(),
    )));

    let app = app_router(search, tracker, profiles)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job aggregator api ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the match engine from configuration. With an API key the engine
/// scores by embedding similarity and writes provider explanations; without
/// one it falls back to keyword overlap.
fn build_engine(config: &AppConfig) -> MatchEngine {
    let timeout = config.matching.provider_timeout;
    let providers = match config.providers.openai_api_key.clone() {
        Some(api_key) => {
            let embeddings = OpenAiEmbeddings::new(&config.providers, api_key.clone(), timeout);
            let explanations = OpenAiExplanations::new(&config.providers, api_key, timeout);
            match (embeddings, explanations) {
                (Ok(embeddings), Ok(explanations)) => Some((
                    Arc::new(embeddings) as Arc<dyn SimilarityProvider>,
                    Arc::new(explanations) as Arc<dyn ExplanationProvider>,
                )),
                (Err(err), _) | (_, Err(err)) => {
                    warn!(error = %err, "provider client setup failed, using keyword matching");
                    None
                }
            }
        }
        None => {
            info!("no provider api key configured, using keyword matching");
            None
        }
    };

    match providers {
        Some((similarity, explainer)) => {
            MatchEngine::new(config.matching.clone(), Some(similarity), Some(explainer))
        }
        None => MatchEngine::new(config.matching.clone(), None, None),
    }
}
