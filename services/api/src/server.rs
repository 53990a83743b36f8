use crate::cli::ServeArgs;
use crate::infra::{load_lookup, merge_data_paths, AppState};
use crate::routes::with_triage_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use retrofit_triage::config::AppConfig;
use retrofit_triage::error::AppError;
use retrofit_triage::telemetry;
use retrofit_triage::workflows::triage::TriageEngine;
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
    config.data = merge_data_paths(config.data, args.data);

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let lookup = load_lookup(&config.data)?;
    let engine = Arc::new(TriageEngine::new(Arc::new(lookup)));

    let app = with_triage_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "retrofit triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
