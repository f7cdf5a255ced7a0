use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryResultStore};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use quantum_dock::catalog::Catalog;
use quantum_dock::config::AppConfig;
use quantum_dock::error::AppError;
use quantum_dock::history::HistoryService;
use quantum_dock::simulation::DockingSimulator;
use quantum_dock::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let mut catalog = Catalog::builtin();
    if let Some(path) = args.molecules_csv.take() {
        catalog = catalog.with_molecules_from_path(path)?;
    }
    if let Some(path) = args.proteins_csv.take() {
        catalog = catalog.with_proteins_from_path(path)?;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: Arc::new(catalog),
        simulator: DockingSimulator::new(config.prediction.mode),
        prediction: config.prediction,
    };

    let store = Arc::new(InMemoryResultStore::default());
    let history_service = Arc::new(HistoryService::new(store));

    let app = with_service_routes(history_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        %addr,
        prediction_mode = config.prediction.mode.label(),
        "quantum dock service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
