use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_frontend_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_score::config::{AppConfig, PredictionConfig};
use credit_score::error::AppError;
use credit_score::telemetry;
use credit_score::workflows::scoring::{PredictionClient, ScoringError, ScoringService};
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let prediction = PredictionConfig::load()?;
    let client = PredictionClient::from_config(&prediction).map_err(ScoringError::from)?;
    let scoring_service = Arc::new(ScoringService::new(client));

    let app = with_frontend_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit score front end ready");

    axum::serve(listener, app).await?;
    Ok(())
}
