use serde::Serialize;

use super::domain::EmployeeProfile;

pub const EXPERIENCE_COLUMN: &str = "Experience";
pub const AGE_COLUMN: &str = "Age";
pub const EDUCATION_PREFIX: &str = "Education";
pub const JOB_TITLE_PREFIX: &str = "Job_Title";
pub const INDUSTRY_PREFIX: &str = "Industry";
pub const CITY_PREFIX: &str = "City";

/// Named model input, laid out in the model's column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| self.values[index])
    }
}

/// One-hot encoder bound to a fixed model schema.
///
/// Categorical attributes become `<Prefix>_<Label>` indicator columns.
/// Schema columns the profile does not produce are zero-filled and profile
/// columns outside the schema are dropped, so the output always has exactly
/// the schema's width and order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureEncoder {
    schema: Vec<String>,
}

impl FeatureEncoder {
    pub fn new<I, S>(schema: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schema: schema.into_iter().map(Into::into).collect(),
        }
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn encode(&self, profile: &EmployeeProfile) -> FeatureVector {
        let present = profile_columns(profile);
        let values = self
            .schema
            .iter()
            .map(|name| {
                present
                    .iter()
                    .find(|(column, _)| column == name)
                    .map(|(_, value)| *value)
                    .unwrap_or(0.0)
            })
            .collect();

        FeatureVector {
            names: self.schema.clone(),
            values,
        }
    }
}

fn profile_columns(profile: &EmployeeProfile) -> [(String, f64); 6] {
    [
        (EXPERIENCE_COLUMN.to_string(), f64::from(profile.experience())),
        (AGE_COLUMN.to_string(), f64::from(profile.age())),
        (indicator(EDUCATION_PREFIX, profile.education().label()), 1.0),
        (indicator(JOB_TITLE_PREFIX, profile.job_title().label()), 1.0),
        (indicator(INDUSTRY_PREFIX, profile.industry().label()), 1.0),
        (indicator(CITY_PREFIX, profile.city().label()), 1.0),
    ]
}

fn indicator(prefix: &str, label: &str) -> String {
    format!("{prefix}_{label}")
}
