use crate::cli::ServeArgs;
use crate::infra::{load_model, AppState};
use crate::routes::with_session_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use salary_predictor::config::AppConfig;
use salary_predictor::error::AppError;
use salary_predictor::history::InMemoryHistoryRepository;
use salary_predictor::report::AverageSalaryTable;
use salary_predictor::session::SalarySessionService;
use salary_predictor::telemetry;
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

    let model = load_model(&config, args.model.take())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let histories = Arc::new(
        InMemoryHistoryRepository::new(config.history.max_records)
            .with_max_sessions(config.history.max_sessions),
    );
    let averages = Arc::new(AverageSalaryTable::standard());
    let session_service = Arc::new(SalarySessionService::new(model, histories, averages));

    let app = with_session_routes(session_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        history_limit = ?config.history.max_records,
        max_sessions = config.history.max_sessions.get(),
        "salary predictor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
