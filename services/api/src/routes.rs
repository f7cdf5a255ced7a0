use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use quantum_dock::catalog::Catalog;
use quantum_dock::error::AppError;
use quantum_dock::history::{history_router, HistoryService, ResultStore};
use quantum_dock::prediction::{input_seed, seeded_rng, AffinityRequest, AffinityResult};
use quantum_dock::report::{ThroughputReport, DEFAULT_BIN_SIZE, DEFAULT_MOLECULES};
use quantum_dock::simulation::{ChartPoint, RunSummary, SimulationRequest, SimulationRun};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Prediction body: the affinity inputs plus an optional fixed seed.
#[derive(Debug, Deserialize)]
pub(crate) struct PredictionPayload {
    #[serde(flatten)]
    pub(crate) request: AffinityRequest,
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SimulationView {
    pub(crate) summary: RunSummary,
    pub(crate) chart: Vec<ChartPoint>,
    #[serde(flatten)]
    pub(crate) run: SimulationRun,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ThroughputQuery {
    pub(crate) seed: Option<u64>,
    pub(crate) molecules: Option<usize>,
    pub(crate) bin_size: Option<usize>,
}

pub(crate) fn with_service_routes<S>(history: Arc<HistoryService<S>>) -> axum::Router
where
    S: ResultStore + 'static,
{
    history_router(history)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/predictions",
            axum::routing::post(prediction_endpoint),
        )
        .route("/api/v1/catalog", axum::routing::get(catalog_endpoint))
        .route(
            "/api/v1/simulations",
            axum::routing::post(simulation_endpoint),
        )
        .route(
            "/api/v1/report/throughput",
            axum::routing::get(throughput_report_endpoint),
        )
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

pub(crate) async fn prediction_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PredictionPayload>,
) -> Result<Json<AffinityResult>, AppError> {
    let PredictionPayload { request, seed } = payload;
    let seed = seed.or(state.prediction.seed).unwrap_or_else(|| {
        input_seed(&request.molecule_representation, &request.target_name)
    });
    debug!(seed, mode = state.prediction.mode.label(), "predicting affinity");

    let result = state
        .prediction
        .mode
        .predict(&request, &mut seeded_rng(seed))?;
    Ok(Json(result))
}

pub(crate) async fn catalog_endpoint(Extension(state): Extension<AppState>) -> Json<Catalog> {
    Json(state.catalog.as_ref().clone())
}

pub(crate) async fn simulation_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<SimulationView>, AppError> {
    let run = state.simulator.run(&state.catalog, &request)?;
    Ok(Json(SimulationView {
        summary: run.summary(),
        chart: run.chart_series(),
        run,
    }))
}

pub(crate) async fn throughput_report_endpoint(
    Query(query): Query<ThroughputQuery>,
) -> Result<Json<ThroughputReport>, AppError> {
    let mut rng = match query.seed {
        Some(seed) => seeded_rng(seed),
        None => StdRng::from_entropy(),
    };
    let report = ThroughputReport::generate(
        &mut rng,
        query.molecules.unwrap_or(DEFAULT_MOLECULES),
        query.bin_size.unwrap_or(DEFAULT_BIN_SIZE),
    )?;
    Ok(Json(report))
}
