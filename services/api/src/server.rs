use crate::cli::ServeArgs;
use crate::infra::{
    sample_tenants, AppState, ConfiguredNotifier, InMemoryInvitationRepository,
    InMemoryShowingRepository,
};
use crate::routes::{app_router, DirectoryRoutes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use renthub::access::PermissionPolicy;
use renthub::config::AppConfig;
use renthub::error::AppError;
use renthub::telemetry;
use renthub::workflows::invitations::InvitationService;
use renthub::workflows::showings::ShowingService;
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

    let policy = Arc::new(PermissionPolicy::standard());
    let notifier = Arc::new(ConfiguredNotifier::from_config(&config.notifications));
    let invitations = Arc::new(InvitationService::new(
        Arc::new(InMemoryInvitationRepository::default()),
        notifier,
    ));
    let showings = Arc::new(ShowingService::new(Arc::new(
        InMemoryShowingRepository::default(),
    )));
    let directory = DirectoryRoutes {
        tenants: Arc::new(sample_tenants()),
        policy: policy.clone(),
    };

    let app = app_router(invitations, showings, directory, policy)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "renthub marketplace api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
