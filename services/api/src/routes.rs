use crate::infra::{AppState, SlotStatus};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use clinic_report::error::AppError;
use clinic_report::reports::views::ReportView;
use clinic_report::reports::{DocumentSource, LoadError, ReportPage, ReportSession, ReportVariant};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) employment: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReportListing {
    pub(crate) variant: ReportVariant,
    pub(crate) label: &'static str,
    pub(crate) title: &'static str,
    pub(crate) asset: String,
    pub(crate) href: String,
    pub(crate) status: SlotStatus,
}

pub(crate) fn report_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/reports", get(list_reports_endpoint))
        .route("/api/v1/reports/:variant", get(report_endpoint))
        .route("/assets/:file", get(asset_endpoint))
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

pub(crate) async fn list_reports_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<ReportListing>> {
    let listings = ReportVariant::ordered()
        .into_iter()
        .map(|variant| {
            let config = variant.config();
            ReportListing {
                variant,
                label: variant.label(),
                title: config.title,
                asset: format!("/assets/{}", config.asset),
                href: format!("/api/v1/reports/{}", variant.slug()),
                status: state.catalog.status(variant),
            }
        })
        .collect();

    Json(listings)
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    Path(variant): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportView>, AppError> {
    let variant = variant
        .parse::<ReportVariant>()
        .map_err(|_| AppError::UnknownVariant(variant))?;
    let document = state.catalog.document(variant)?;

    let mut session = ReportSession::with_document(variant.config(), document);
    if let Some(key) = query.category.as_deref() {
        session.select_category_key(key)?;
    }
    if let Some(key) = query.employment.as_deref() {
        session.select_employment_key(key)?;
    }

    match session.page()? {
        ReportPage::Ready(view) => Ok(Json(*view)),
        ReportPage::Loading { .. } => Err(AppError::NotLoaded(variant)),
    }
}

pub(crate) async fn asset_endpoint(
    Extension(state): Extension<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = state.assets.fetch(&file).await.map_err(|err| match err {
        LoadError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            AppError::AssetNotFound(file.clone())
        }
        LoadError::InvalidAsset(_) => AppError::AssetNotFound(file.clone()),
        other => AppError::Load(other),
    })?;

    let mime = mime_guess::from_path(&file).first_or_octet_stream();
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.essence_str().to_string())],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::ReportCatalog;
    use axum::body::Body;
    use axum::http::Request;
    use clinic_report::reports::{FsDocumentSource, JobDocument};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn asset_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../public")
    }

    fn app(load: &[ReportVariant]) -> Router {
        let catalog = Arc::new(ReportCatalog::default());
        for &variant in load {
            let config = variant.config();
            let document =
                JobDocument::from_path(asset_root().join(config.asset), config.employment)
                    .expect("stock asset parses");
            catalog.store(variant, Ok(document));
        }

        let state = AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            catalog,
            assets: Arc::new(FsDocumentSource::new(asset_root())),
        };
        report_routes().layer(Extension(state))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn default_selection_is_nurses_full_time() {
        let (status, body) =
            get_json(app(&[ReportVariant::Asagaya]), "/api/v1/reports/asagaya").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selection"]["category"], "nurses");
        assert_eq!(body["selection"]["employment"], "fullTime");
        assert_eq!(body["statistics"]["figures"][0]["display"], "¥29.5万");
        assert_eq!(body["jobs"]["count"], 3);
    }

    #[tokio::test]
    async fn query_parameters_select_the_bucket() {
        let (status, body) = get_json(
            app(&[ReportVariant::Asagaya]),
            "/api/v1/reports/asagaya?category=medicalOffice&employment=partTime",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["statistics"]["mode"], "hourly");
        assert_eq!(body["jobs"]["count_label"], "3件の求人");
        assert_eq!(body["jobs"]["cards"][0]["compensation"], "¥1250/時間");
    }

    #[tokio::test]
    async fn pending_dataset_answers_loading() {
        let (status, body) = get_json(app(&[]), "/api/v1/reports/machida").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "loading");
    }

    #[tokio::test]
    async fn invalid_keys_are_rejected() {
        let (status, _) = get_json(
            app(&[ReportVariant::Machida]),
            "/api/v1/reports/machida?category=radiologist",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(
            app(&[ReportVariant::Machida]),
            "/api/v1/reports/machida?employment=fullTime",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(app(&[]), "/api/v1/reports/shinjuku").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn listing_reports_slot_status() {
        let (status, body) = get_json(app(&[ReportVariant::Machida]), "/api/v1/reports").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["status"], "loading");
        assert_eq!(body[1]["status"], "ready");
        assert_eq!(body[1]["asset"], "/assets/machida_extended_jobs.json");
    }

    #[tokio::test]
    async fn serves_raw_assets_with_json_content_type() {
        let response = app(&[])
            .oneshot(
                Request::get("/assets/clinic_job_data.json")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let (status, _) = get_json(app(&[]), "/assets/missing.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
