use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const EXPERIENCE_RANGE: RangeInclusive<u8> = 0..=40;
pub const AGE_RANGE: RangeInclusive<u8> = 20..=65;
pub const DEFAULT_EXPERIENCE: u8 = 5;
pub const DEFAULT_AGE: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Education {
    Bachelor,
    Master,
    PhD,
}

impl Education {
    pub const fn ordered() -> [Self; 3] {
        [Self::Bachelor, Self::Master, Self::PhD]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bachelor => "Bachelor",
            Self::Master => "Master",
            Self::PhD => "PhD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobTitle {
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "Web Developer")]
    WebDeveloper,
    #[serde(rename = "UI/UX Designer")]
    UiUxDesigner,
    #[serde(rename = "DevOps Engineer")]
    DevOpsEngineer,
}

impl JobTitle {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::DataScientist,
            Self::WebDeveloper,
            Self::UiUxDesigner,
            Self::DevOpsEngineer,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DataScientist => "Data Scientist",
            Self::WebDeveloper => "Web Developer",
            Self::UiUxDesigner => "UI/UX Designer",
            Self::DevOpsEngineer => "DevOps Engineer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "IT")]
    It,
    Retail,
    Manufacturing,
    Telecom,
}

impl Industry {
    pub const fn ordered() -> [Self; 4] {
        [Self::It, Self::Retail, Self::Manufacturing, Self::Telecom]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Retail => "Retail",
            Self::Manufacturing => "Manufacturing",
            Self::Telecom => "Telecom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum City {
    Mumbai,
    Delhi,
    Bangalore,
    Chennai,
    Hyderabad,
    Pune,
}

impl City {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Mumbai,
            Self::Delhi,
            Self::Bangalore,
            Self::Chennai,
            Self::Hyderabad,
            Self::Pune,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mumbai => "Mumbai",
            Self::Delhi => "Delhi",
            Self::Bangalore => "Bangalore",
            Self::Chennai => "Chennai",
            Self::Hyderabad => "Hyderabad",
            Self::Pune => "Pune",
        }
    }
}

/// Names the user-facing input a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Experience,
    Age,
    Education,
    JobTitle,
    Industry,
    City,
}

impl InputField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Experience => "Experience",
            Self::Age => "Age",
            Self::Education => "Education",
            Self::JobTitle => "Job Title",
            Self::Industry => "Industry",
            Self::City => "City",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected employee input. Raised before the model is ever consulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("{field} '{value}' is not one of: {expected}")]
    UnknownOption {
        field: InputField,
        value: String,
        expected: String,
    },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: InputField,
        value: i64,
        min: u8,
        max: u8,
    },
}

impl InvalidInput {
    pub fn field(&self) -> InputField {
        match self {
            Self::UnknownOption { field, .. } | Self::OutOfRange { field, .. } => *field,
        }
    }
}

fn parse_option<T: Copy>(
    field: InputField,
    raw: &str,
    options: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, InvalidInput> {
    let wanted = raw.trim();
    options
        .iter()
        .copied()
        .find(|option| label(*option) == wanted)
        .ok_or_else(|| InvalidInput::UnknownOption {
            field,
            value: raw.to_string(),
            expected: options
                .iter()
                .map(|option| label(*option))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn check_range(
    field: InputField,
    value: i64,
    range: &RangeInclusive<u8>,
) -> Result<u8, InvalidInput> {
    u8::try_from(value)
        .ok()
        .filter(|candidate| range.contains(candidate))
        .ok_or(InvalidInput::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
}

impl FromStr for Education {
    type Err = InvalidInput;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option(InputField::Education, raw, &Self::ordered(), Self::label)
    }
}

impl FromStr for JobTitle {
    type Err = InvalidInput;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option(InputField::JobTitle, raw, &Self::ordered(), Self::label)
    }
}

impl FromStr for Industry {
    type Err = InvalidInput;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option(InputField::Industry, raw, &Self::ordered(), Self::label)
    }
}

impl FromStr for City {
    type Err = InvalidInput;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option(InputField::City, raw, &Self::ordered(), Self::label)
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for JobTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw selections as they arrive from a form or CLI, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub experience: i64,
    pub age: i64,
    pub education: String,
    pub job_title: String,
    pub industry: String,
    pub city: String,
}

/// Validated employee attributes. Construction enforces the option lists
/// and the slider ranges, so every profile is safe to hand to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EmployeeProfile {
    experience: u8,
    age: u8,
    education: Education,
    job_title: JobTitle,
    industry: Industry,
    city: City,
}

impl EmployeeProfile {
    pub fn new(
        experience: i64,
        age: i64,
        education: Education,
        job_title: JobTitle,
        industry: Industry,
        city: City,
    ) -> Result<Self, InvalidInput> {
        let experience = check_range(InputField::Experience, experience, &EXPERIENCE_RANGE)?;
        let age = check_range(InputField::Age, age, &AGE_RANGE)?;

        Ok(Self {
            experience,
            age,
            education,
            job_title,
            industry,
            city,
        })
    }

    pub fn experience(&self) -> u8 {
        self.experience
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn education(&self) -> Education {
        self.education
    }

    pub fn job_title(&self) -> JobTitle {
        self.job_title
    }

    pub fn industry(&self) -> Industry {
        self.industry
    }

    pub fn city(&self) -> City {
        self.city
    }
}

impl TryFrom<&EmployeeInput> for EmployeeProfile {
    type Error = InvalidInput;

    fn try_from(input: &EmployeeInput) -> Result<Self, Self::Error> {
        Self::new(
            input.experience,
            input.age,
            input.education.parse()?,
            input.job_title.parse()?,
            input.industry.parse()?,
            input.city.parse()?,
        )
    }
}

impl TryFrom<EmployeeInput> for EmployeeProfile {
    type Error = InvalidInput;

    fn try_from(input: EmployeeInput) -> Result<Self, Self::Error> {
        Self::try_from(&input)
    }
}

/// A single salary prediction. Fields are private so a record cannot change
/// once the prediction service has produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRecord {
    #[serde(flatten)]
    profile: EmployeeProfile,
    predicted_salary: u64,
}

impl PredictionRecord {
    pub fn new(profile: EmployeeProfile, predicted_salary: u64) -> Self {
        Self {
            profile,
            predicted_salary,
        }
    }

    pub fn profile(&self) -> &EmployeeProfile {
        &self.profile
    }

    pub fn job_title(&self) -> JobTitle {
        self.profile.job_title
    }

    pub fn predicted_salary(&self) -> u64 {
        self.predicted_salary
    }
}
