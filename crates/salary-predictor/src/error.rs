use crate::config::ConfigError;
use crate::export::ExportError;
use crate::history::HistoryError;
use crate::prediction::{ModelLoadError, PredictionError};
use crate::session::SessionServiceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::warn;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    ModelUnavailable(ModelLoadError),
    Prediction(PredictionError),
    Export(ExportError),
    Session(SessionServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::ModelUnavailable(err) => write!(f, "model unavailable: {}", err),
            AppError::Prediction(err) => write!(f, "{}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Session(err) => write!(f, "{}", err),
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
            AppError::ModelUnavailable(err) => Some(err),
            AppError::Prediction(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Session(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Prediction(PredictionError::InvalidInput(_))
            | AppError::Session(SessionServiceError::Prediction(PredictionError::InvalidInput(
                _,
            ))) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Prediction(_)
            | AppError::Session(SessionServiceError::Prediction(_)) => StatusCode::BAD_GATEWAY,
            AppError::Session(SessionServiceError::History(HistoryError::SessionNotFound))
            | AppError::Session(SessionServiceError::Export(ExportError::UnknownFormat(_)))
            | AppError::Export(ExportError::UnknownFormat(_)) => StatusCode::NOT_FOUND,
            AppError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Export(_)
            | AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(%status, error = %self, "request failed");
        }

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

impl From<ModelLoadError> for AppError {
    fn from(value: ModelLoadError) -> Self {
        Self::ModelUnavailable(value)
    }
}

impl From<PredictionError> for AppError {
    fn from(value: PredictionError) -> Self {
        Self::Prediction(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<SessionServiceError> for AppError {
    fn from(value: SessionServiceError) -> Self {
        Self::Session(value)
    }
}
