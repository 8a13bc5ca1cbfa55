use crate::cli::ServeArgs;
use crate::infra::{
    default_eligibility_config, AppState, InMemoryRegistrationRepository, RecordingDispatcher,
    SharedNotices,
};
use crate::routes::with_registration_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use trial_intake::config::AppConfig;
use trial_intake::error::AppError;
use trial_intake::registration::RegistrationService;
use trial_intake::telemetry;

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

    let repository = Arc::new(InMemoryRegistrationRepository::default());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let registration_service = Arc::new(RegistrationService::new(
        repository,
        dispatcher,
        default_eligibility_config(),
    ));

    let app = with_registration_routes(registration_service)
        .layer(Extension(app_state))
        .layer(Extension(SharedNotices::default()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "clinical trial intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
