use crate::cli::ServeArgs;
use crate::demo::sample_listings;
use crate::infra::{AppState, InMemoryListingCatalog};
use crate::routes::with_directory_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tutorhub::config::AppConfig;
use tutorhub::directory::listings_from_path;
use tutorhub::error::AppError;
use tutorhub::telemetry;
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

    let listings = match &config.directory.listings_csv {
        Some(path) => listings_from_path(path)?,
        None => sample_listings(),
    };
    let catalog = Arc::new(InMemoryListingCatalog::new(listings));
    info!(listings = catalog.len(), "listing catalog loaded");

    let app = with_directory_routes(catalog, config.directory.page_size)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "directory service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
