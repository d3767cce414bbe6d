use crate::cli::ServeArgs;
use crate::infra::{AppState, SummarySettings};
use crate::routes::with_summary_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rorschach_cs::config::AppConfig;
use rorschach_cs::error::AppError;
use rorschach_cs::scoring::tables::TABLE_EDITION;
use rorschach_cs::telemetry;
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

    let app = with_summary_routes(SummarySettings::from(&config.protocol))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        tables = TABLE_EDITION,
        min_responses = config.protocol.min_responses,
        "structural summary service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
