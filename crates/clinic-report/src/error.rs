use crate::config::ConfigError;
use crate::reports::{LoadError, ReportError, ReportVariant, SelectionError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Load(LoadError),
    Selection(SelectionError),
    Report(ReportError),
    UnknownVariant(String),
    /// The variant's dataset has not arrived (or never will).
    NotLoaded(ReportVariant),
    AssetNotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Load(err) => write!(f, "dataset error: {}", err),
            AppError::Selection(err) => write!(f, "invalid selection: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::UnknownVariant(name) => write!(f, "unknown report variant '{}'", name),
            AppError::NotLoaded(variant) => write!(f, "report {} is still loading", variant),
            AppError::AssetNotFound(name) => write!(f, "asset '{}' not found", name),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Load(err) => Some(err),
            AppError::Selection(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::UnknownVariant(_) | AppError::NotLoaded(_) | AppError::AssetNotFound(_) => {
                None
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::NotLoaded(variant) = &self {
            let body = Json(json!({ "status": "loading", "variant": variant }));
            return (StatusCode::SERVICE_UNAVAILABLE, body).into_response();
        }

        let status = match self {
            AppError::Selection(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownVariant(_) | AppError::AssetNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Report(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotLoaded(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<LoadError> for AppError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<SelectionError> for AppError {
    fn from(value: SelectionError) -> Self {
        Self::Selection(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::domain::JobCategory;

    #[test]
    fn selection_errors_are_client_errors() {
        let response =
            AppError::from(SelectionError::CategoryNotOffered(JobCategory::Radiologist))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn pending_datasets_map_to_service_unavailable() {
        let response = AppError::NotLoaded(ReportVariant::Machida).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn unresolvable_buckets_are_not_hidden() {
        let err = AppError::from(ReportError::MissingStatistics {
            category: JobCategory::Nurses,
            employment: "fullTime",
        });
        assert!(err.to_string().contains("nurses/fullTime"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
