use metrics_exporter_prometheus::PrometheusHandle;
use salary_predictor::config::AppConfig;
use salary_predictor::error::AppError;
use salary_predictor::prediction::LinearSalaryModel;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the model named on the command line, falling back to configuration.
/// A missing or malformed artifact is fatal for every command.
pub(crate) fn load_model(
    config: &AppConfig,
    override_path: Option<PathBuf>,
) -> Result<Arc<LinearSalaryModel>, AppError> {
    let path = override_path.unwrap_or_else(|| config.model.artifact_path.clone());
    let model = LinearSalaryModel::from_path(&path)?;
    Ok(Arc::new(model))
}
