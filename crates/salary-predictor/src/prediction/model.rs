use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::encoder::FeatureVector;

/// Pre-trained regression model. Implementations are opaque to the service:
/// it only relies on the ordered feature schema and a scalar prediction.
pub trait SalaryModel: Send + Sync {
    fn feature_names(&self) -> &[String];
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

/// Failure raised by a model while evaluating a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("feature vector has {actual} columns, model expects {expected}")]
    Shape { expected: usize, actual: usize },
    #[error("feature '{found}' at position {index} does not match model column '{expected}'")]
    Column {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("model evaluation failed: {0}")]
    Evaluation(String),
}

/// Startup failure while loading the model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact declares {features} features but {coefficients} coefficients")]
    Schema { features: usize, coefficients: usize },
    #[error("model artifact declares no features")]
    Empty,
}

/// Linear regression artifact stored as JSON:
/// `{ "feature_names": [...], "intercept": f64, "coefficients": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSalaryModel {
    feature_names: Vec<String>,
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearSalaryModel {
    pub fn new(
        feature_names: Vec<String>,
        intercept: f64,
        coefficients: Vec<f64>,
    ) -> Result<Self, ModelLoadError> {
        Self {
            feature_names,
            intercept,
            coefficients,
        }
        .validated()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            features = model.feature_names.len(),
            "salary model loaded"
        );
        Ok(model)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let model: Self = serde_json::from_reader(reader)?;
        model.validated()
    }

    fn validated(self) -> Result<Self, ModelLoadError> {
        if self.feature_names.is_empty() {
            return Err(ModelLoadError::Empty);
        }
        if self.feature_names.len() != self.coefficients.len() {
            return Err(ModelLoadError::Schema {
                features: self.feature_names.len(),
                coefficients: self.coefficients.len(),
            });
        }
        Ok(self)
    }
}

impl SalaryModel for LinearSalaryModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::Shape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        if let Some((index, (expected, found))) = self
            .feature_names
            .iter()
            .zip(features.names())
            .enumerate()
            .find(|(_, (expected, found))| expected != found)
        {
            return Err(ModelError::Column {
                index,
                expected: expected.clone(),
                found: found.clone(),
            });
        }

        let weighted: f64 = self
            .coefficients
            .iter()
            .zip(features.values())
            .map(|(weight, value)| weight * value)
            .sum();

        Ok(self.intercept + weighted)
    }
}
