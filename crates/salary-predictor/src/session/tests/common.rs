use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::history::InMemoryHistoryRepository;
use crate::prediction::{EmployeeInput, FeatureVector, ModelError, SalaryModel};
use crate::report::AverageSalaryTable;
use crate::session::{session_router, SalarySessionService};

/// Returns `base + 10_000 * experience` plus a fractional part that must be
/// truncated away.
pub(super) struct ExperienceModel {
    names: Vec<String>,
    base: f64,
}

impl Default for ExperienceModel {
    fn default() -> Self {
        Self {
            names: vec!["Experience".to_string(), "Age".to_string()],
            base: 762_345.75,
        }
    }
}

impl SalaryModel for ExperienceModel {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let experience = features
            .get("Experience")
            .ok_or_else(|| ModelError::Evaluation("missing Experience".to_string()))?;
        Ok(self.base + 10_000.0 * experience)
    }
}

pub(super) struct FailingModel;

impl SalaryModel for FailingModel {
    fn feature_names(&self) -> &[String] {
        &[]
    }

    fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
        Err(ModelError::Evaluation("model offline".to_string()))
    }
}

pub(super) type TestService = SalarySessionService<ExperienceModel, InMemoryHistoryRepository>;

pub(super) fn build_service() -> TestService {
    SalarySessionService::new(
        Arc::new(ExperienceModel::default()),
        Arc::new(InMemoryHistoryRepository::default()),
        Arc::new(AverageSalaryTable::standard()),
    )
}

pub(super) fn failing_service() -> SalarySessionService<FailingModel, InMemoryHistoryRepository> {
    SalarySessionService::new(
        Arc::new(FailingModel),
        Arc::new(InMemoryHistoryRepository::default()),
        Arc::new(AverageSalaryTable::standard()),
    )
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    session_router(Arc::new(service))
}

pub(super) fn input(job_title: &str, experience: i64) -> EmployeeInput {
    EmployeeInput {
        experience,
        age: 30,
        education: "Bachelor".to_string(),
        job_title: job_title.to_string(),
        industry: "IT".to_string(),
        city: "Mumbai".to_string(),
    }
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}
