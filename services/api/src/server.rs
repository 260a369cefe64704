use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredAnalyzer};
use crate::routes::with_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholar_ai::config::AppConfig;
use scholar_ai::error::AppError;
use scholar_ai::telemetry;
use scholar_ai::workflows::eligibility::EligibilityEngine;
use scholar_ai::workflows::essay::EssayScorer;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(config.catalog.load()?);
    info!(
        scholarships = catalog.len(),
        source = ?config.catalog.path,
        "scholarship catalog loaded"
    );
    let engine = Arc::new(EligibilityEngine::new(catalog));

    let analyzer = Arc::new(ConfiguredAnalyzer::from_config(&config.semantic));
    let model = analyzer.model().map(str::to_owned);
    let scorer = Arc::new(EssayScorer::new(analyzer));

    let app = with_routes(engine, scorer)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, ?model, "scholarship matcher ready");

    axum::serve(listener, app).await?;
    Ok(())
}
