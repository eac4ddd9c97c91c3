use salary_predictor::prediction::{
    City, Education, EmployeeProfile, Industry, JobTitle, LinearSalaryModel, PredictionService,
    SalaryModel,
};
use std::path::PathBuf;
use std::sync::Arc;

fn bundled_model() -> LinearSalaryModel {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../model/salary_model.json");
    LinearSalaryModel::from_path(path).expect("bundled model loads")
}

#[test]
fn bundled_schema_covers_every_option() {
    let model = bundled_model();
    let schema = model.feature_names();

    let mut expected = vec!["Experience".to_string(), "Age".to_string()];
    expected.extend(Education::ordered().map(|value| format!("Education_{value}")));
    expected.extend(JobTitle::ordered().map(|value| format!("Job_Title_{value}")));
    expected.extend(Industry::ordered().map(|value| format!("Industry_{value}")));
    expected.extend(City::ordered().map(|value| format!("City_{value}")));

    for column in &expected {
        assert!(schema.contains(column), "missing column {column}");
    }
    assert_eq!(schema.len(), expected.len());
}

#[test]
fn bundled_model_predicts_default_profile() {
    let service = PredictionService::new(Arc::new(bundled_model()));
    let profile = EmployeeProfile::new(
        5,
        30,
        Education::Bachelor,
        JobTitle::DataScientist,
        Industry::It,
        City::Mumbai,
    )
    .expect("valid profile");

    let record = service.predict(&profile).expect("prediction succeeds");
    assert_eq!(record.predicted_salary(), 875_000);
}

#[test]
fn bundled_model_rewards_experience() {
    let service = PredictionService::new(Arc::new(bundled_model()));
    let salary_at = |experience| {
        let profile = EmployeeProfile::new(
            experience,
            40,
            Education::Master,
            JobTitle::WebDeveloper,
            Industry::Retail,
            City::Pune,
        )
        .expect("valid profile");
        service.estimate(&profile).expect("prediction succeeds")
    };

    assert!(salary_at(10) > salary_at(2));
}
