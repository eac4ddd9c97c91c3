use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use super::service::{estimate_notice, SalarySessionService, SessionServiceError};
use crate::error::AppError;
use crate::export::ExportFormat;
use crate::history::{HistoryRepository, SessionId};
use crate::prediction::domain::{AGE_RANGE, DEFAULT_AGE, DEFAULT_EXPERIENCE, EXPERIENCE_RANGE};
use crate::prediction::{
    City, Education, EmployeeInput, Industry, JobTitle, PredictionRecord, SalaryModel,
};
use crate::report::{ComparisonRow, HistoryRow, FULL_COMPARISON_TITLE, LATEST_COMPARISON_TITLE};

const CLEARED_MESSAGE: &str = "Prediction history cleared!";
const EMPTY_HISTORY_NOTICE: &str = "No predictions available yet to export.";

#[derive(Debug, Clone, Serialize)]
pub struct SessionOpened {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub record: PredictionRecord,
    pub notice: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub session_id: SessionId,
    pub count: usize,
    pub rows: Vec<HistoryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub title: &'static str,
    pub rows: Vec<ComparisonRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

impl ComparisonView {
    fn new(title: &'static str, rows: Vec<ComparisonRow>) -> Self {
        let notice = rows.is_empty().then_some(EMPTY_HISTORY_NOTICE);
        Self {
            title,
            rows,
            notice,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SliderRange {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

/// Everything a form needs to render its inputs.
#[derive(Debug, Clone, Serialize)]
pub struct OptionsView {
    pub education: Vec<&'static str>,
    pub job_titles: Vec<&'static str>,
    pub industries: Vec<&'static str>,
    pub cities: Vec<&'static str>,
    pub experience: SliderRange,
    pub age: SliderRange,
    pub export_formats: Vec<ExportFormat>,
}

impl OptionsView {
    pub fn standard() -> Self {
        Self {
            education: Education::ordered().map(Education::label).to_vec(),
            job_titles: JobTitle::ordered().map(JobTitle::label).to_vec(),
            industries: Industry::ordered().map(Industry::label).to_vec(),
            cities: City::ordered().map(City::label).to_vec(),
            experience: SliderRange {
                min: *EXPERIENCE_RANGE.start(),
                max: *EXPERIENCE_RANGE.end(),
                default: DEFAULT_EXPERIENCE,
            },
            age: SliderRange {
                min: *AGE_RANGE.start(),
                max: *AGE_RANGE.end(),
                default: DEFAULT_AGE,
            },
            export_formats: ExportFormat::ordered().to_vec(),
        }
    }
}

/// Router builder exposing session, prediction, comparison, and export endpoints.
pub fn session_router<M, R>(service: Arc<SalarySessionService<M, R>>) -> Router
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/options", get(options_handler))
        .route("/api/v1/sessions", post(open_handler::<M, R>))
        .route("/api/v1/sessions/:session_id", delete(close_handler::<M, R>))
        .route(
            "/api/v1/sessions/:session_id/predictions",
            get(history_handler::<M, R>)
                .post(predict_handler::<M, R>)
                .delete(clear_handler::<M, R>),
        )
        .route(
            "/api/v1/sessions/:session_id/comparison/latest",
            get(latest_comparison_handler::<M, R>),
        )
        .route(
            "/api/v1/sessions/:session_id/comparison/full",
            get(full_comparison_handler::<M, R>),
        )
        .route(
            "/api/v1/sessions/:session_id/export/:format",
            get(export_handler::<M, R>),
        )
        .with_state(service)
}

pub(crate) async fn options_handler() -> Json<OptionsView> {
    Json(OptionsView::standard())
}

pub(crate) async fn open_handler<M, R>(
    State(service): State<Arc<SalarySessionService<M, R>>>,
) -> Response
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    match service.open_session() {
        Ok(session_id) => (StatusCode::CREATED, Json(SessionOpened { session_id })).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn close_handler<M, R>(
    State(service): State<Arc<SalarySessionService<M, R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    match service.close_session(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn predict_handler<M, R>(
    State(service): State<Arc<SalarySessionService<M, R>>>,
    Path(session_id): Path<String>,
    Json(input): Json<EmployeeInput>,
) -> Response
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    let session = SessionId(session_id);
    match service.predict(&session, &input) {
        Ok(record) => {
            let notice = estimate_notice(&record);
            (StatusCode::CREATED, Json(PredictionResponse { record, notice })).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn history_handler<M, R>(
    State(service): State<Arc<SalarySessionService<M, R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    let session = SessionId(session_id);
    match service.history_rows(&session) {
        Ok(rows) => {
            let view = HistoryView {
                session_id: session,
                count: rows.len(),
                rows,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn clear_handler<M, R>(
    State(service): State<Arc<SalarySessionService<M, R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    match service.clear(&SessionId(session_id)) {
        Ok(()) => (
            StatusCode::OK,
            Json(ClearResponse {
                message: CLEARED_MESSAGE,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn latest_comparison_handler<M, R>(
    State(service): State<Arc<SalarySessionService<M, R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    match service.latest_comparison(&SessionId(session_id)) {
        Ok(rows) => Json(ComparisonView::new(LATEST_COMPARISON_TITLE, rows)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn full_comparison_handler<M, R>(
    State(service): State<Arc<SalarySessionService<M, R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    match service.full_comparison(&SessionId(session_id)) {
        Ok(rows) => Json(ComparisonView::new(FULL_COMPARISON_TITLE, rows)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<M, R>(
    State(service): State<Arc<SalarySessionService<M, R>>>,
    Path((session_id, format)): Path<(String, String)>,
) -> Response
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    let format = match format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(err) => return error_response(err.into()),
    };

    match service.export(&SessionId(session_id), format) {
        Ok(bytes) => {
            let headers = [
                (header::CONTENT_TYPE, format.content_type().to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", format.file_name()),
                ),
            ];
            (StatusCode::OK, headers, bytes).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(error: SessionServiceError) -> Response {
    AppError::from(error).into_response()
}
