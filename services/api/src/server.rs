use crate::cli::ServeArgs;
use crate::infra::{spawn_dataset_loads, AppState, ReportCatalog};
use crate::routes::report_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use clinic_report::config::AppConfig;
use clinic_report::error::AppError;
use clinic_report::reports::FsDocumentSource;
use clinic_report::telemetry::{self, LogSink};
use std::sync::atomic::AtomicBool;
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
    if let Some(asset_dir) = args.asset_dir.take() {
        config.assets.root = asset_dir;
    }

    telemetry::init(&config.telemetry, LogSink::Stdout)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let catalog = Arc::new(ReportCatalog::default());
    let assets = Arc::new(FsDocumentSource::new(config.assets.root.clone()));

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: catalog.clone(),
        assets: assets.clone(),
    };

    let app = report_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    spawn_dataset_loads(catalog, assets, readiness_flag);

    info!(
        ?config.environment,
        %addr,
        asset_dir = %config.assets.root.display(),
        "clinic report service listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
