use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{EmployeeInput, EmployeeProfile, InvalidInput, PredictionRecord};
use super::encoder::FeatureEncoder;
use super::model::{ModelError, SalaryModel};

/// Wraps the opaque model call. Recording the result is left to the caller.
pub struct PredictionService<M> {
    model: Arc<M>,
    encoder: FeatureEncoder,
}

impl<M> PredictionService<M>
where
    M: SalaryModel,
{
    pub fn new(model: Arc<M>) -> Self {
        let encoder = FeatureEncoder::new(model.feature_names().iter().cloned());
        Self { model, encoder }
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Integer salary for a validated profile, truncated toward zero.
    pub fn estimate(&self, profile: &EmployeeProfile) -> Result<u64, PredictionError> {
        let features = self.encoder.encode(profile);
        let raw = self.model.predict(&features).map_err(|err| {
            warn!(job_title = %profile.job_title(), error = %err, "salary model call failed");
            PredictionError::PredictionFailed(err)
        })?;
        salary_from_output(raw)
    }

    pub fn predict(&self, profile: &EmployeeProfile) -> Result<PredictionRecord, PredictionError> {
        let salary = self.estimate(profile)?;
        info!(
            job_title = %profile.job_title(),
            experience = profile.experience(),
            salary,
            "salary predicted"
        );
        Ok(PredictionRecord::new(*profile, salary))
    }

    /// Validates raw selections, then predicts. Invalid input never reaches the model.
    pub fn predict_input(
        &self,
        input: &EmployeeInput,
    ) -> Result<PredictionRecord, PredictionError> {
        let profile = EmployeeProfile::try_from(input)?;
        self.predict(&profile)
    }
}

fn salary_from_output(raw: f64) -> Result<u64, PredictionError> {
    if !raw.is_finite() {
        return Err(PredictionError::NonFiniteOutput(raw));
    }
    if raw <= 0.0 {
        return Ok(0);
    }
    Ok(raw.trunc() as u64)
}

/// Error raised by the prediction service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("prediction failed: {0}")]
    PredictionFailed(ModelError),
    #[error("prediction failed: model returned non-finite output {0}")]
    NonFiniteOutput(f64),
}

impl PredictionError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::encoder::FeatureVector;

    struct ConstantModel {
        names: Vec<String>,
        output: f64,
    }

    impl ConstantModel {
        fn new(output: f64) -> Self {
            Self {
                names: vec!["Experience".to_string(), "Job_Title_Data Scientist".to_string()],
                output,
            }
        }
    }

    impl SalaryModel for ConstantModel {
        fn feature_names(&self) -> &[String] {
            &self.names
        }

        fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
            Ok(self.output)
        }
    }

    struct BrokenModel;

    impl SalaryModel for BrokenModel {
        fn feature_names(&self) -> &[String] {
            &[]
        }

        fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
            Err(ModelError::Evaluation("booster corrupted".to_string()))
        }
    }

    fn input() -> EmployeeInput {
        EmployeeInput {
            experience: 5,
            age: 30,
            education: "Bachelor".to_string(),
            job_title: "Data Scientist".to_string(),
            industry: "IT".to_string(),
            city: "Mumbai".to_string(),
        }
    }

    #[test]
    fn truncates_instead_of_rounding() {
        let service = PredictionService::new(Arc::new(ConstantModel::new(812_345.99)));
        let record = service.predict_input(&input()).expect("prediction succeeds");
        assert_eq!(record.predicted_salary(), 812_345);
    }

    #[test]
    fn negative_output_clamps_to_zero() {
        let service = PredictionService::new(Arc::new(ConstantModel::new(-12.5)));
        let profile = EmployeeProfile::try_from(input()).expect("valid");
        assert_eq!(service.estimate(&profile), Ok(0));
    }

    #[test]
    fn non_finite_output_is_a_prediction_failure() {
        let service = PredictionService::new(Arc::new(ConstantModel::new(f64::NAN)));
        let err = service.predict_input(&input()).expect_err("nan output");
        assert!(matches!(err, PredictionError::NonFiniteOutput(_)));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn model_errors_surface_as_prediction_failed() {
        let service = PredictionService::new(Arc::new(BrokenModel));
        let err = service.predict_input(&input()).expect_err("model raises");
        assert_eq!(
            err,
            PredictionError::PredictionFailed(ModelError::Evaluation(
                "booster corrupted".to_string()
            ))
        );
    }

    #[test]
    fn invalid_input_is_rejected_before_the_model() {
        let service = PredictionService::new(Arc::new(BrokenModel));
        let mut raw = input();
        raw.city = "Paris".to_string();
        let err = service.predict_input(&raw).expect_err("unknown city");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn encoder_follows_model_schema() {
        let service = PredictionService::new(Arc::new(ConstantModel::new(1.0)));
        assert_eq!(
            service.encoder().schema(),
            &["Experience".to_string(), "Job_Title_Data Scientist".to_string()]
        );
    }
}
