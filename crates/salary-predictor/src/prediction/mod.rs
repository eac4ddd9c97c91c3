pub mod domain;
pub mod encoder;
mod model;
mod service;

pub use domain::{
    City, Education, EmployeeInput, EmployeeProfile, Industry, InputField, InvalidInput, JobTitle,
    PredictionRecord,
};
pub use encoder::{FeatureEncoder, FeatureVector};
pub use model::{LinearSalaryModel, ModelError, ModelLoadError, SalaryModel};
pub use service::{PredictionError, PredictionService};
