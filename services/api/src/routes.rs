use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use salary_predictor::history::HistoryRepository;
use salary_predictor::prediction::SalaryModel;
use salary_predictor::session::{session_router, SalarySessionService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_session_routes<M, R>(service: Arc<SalarySessionService<M, R>>) -> axum::Router
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    session_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use salary_predictor::history::InMemoryHistoryRepository;
    use salary_predictor::prediction::LinearSalaryModel;
    use salary_predictor::report::AverageSalaryTable;
    use std::io::Cursor;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    const ARTIFACT: &str = r#"{
        "feature_names": ["Experience", "Job_Title_Data Scientist"],
        "intercept": 500000.0,
        "coefficients": [20000.0, 212345.5]
    }"#;

    fn app() -> axum::Router {
        let model = LinearSalaryModel::from_reader(Cursor::new(ARTIFACT)).expect("artifact loads");
        let service = Arc::new(SalarySessionService::new(
            Arc::new(model),
            Arc::new(InMemoryHistoryRepository::default()),
            Arc::new(AverageSalaryTable::standard()),
        ));
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(recorder.handle()),
        };
        with_session_routes(service).layer(Extension(state))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_reports_initializing_before_bind() {
        let response = app()
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn session_routes_are_mounted() {
        let response = app()
            .oneshot(
                Request::post("/api/v1/sessions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
