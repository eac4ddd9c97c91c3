use serde::Serialize;

use super::averages::AverageSalaryTable;
use crate::prediction::{JobTitle, PredictionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SalaryKind {
    #[serde(rename = "Predicted_Salary")]
    Predicted,
    #[serde(rename = "Avg_Salary")]
    Average,
}

impl SalaryKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Predicted => "Predicted_Salary",
            Self::Average => "Avg_Salary",
        }
    }
}

/// One bar or line point: a salary of a given kind for one prediction.
/// `ordinal` is the 1-based position of the prediction in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub ordinal: usize,
    pub job_title: JobTitle,
    pub experience: u8,
    pub kind: SalaryKind,
    pub salary: Option<u64>,
}

/// A history record joined with its reference average.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub ordinal: usize,
    #[serde(flatten)]
    pub record: PredictionRecord,
    pub average_salary: Option<u64>,
}

pub fn history_rows(
    history: &[PredictionRecord],
    averages: &AverageSalaryTable,
) -> Vec<HistoryRow> {
    history
        .iter()
        .enumerate()
        .map(|(index, record)| HistoryRow {
            ordinal: index + 1,
            record: record.clone(),
            average_salary: averages.average_for(record.job_title()),
        })
        .collect()
}

/// Predicted vs. average for the most recent prediction only.
pub fn latest_comparison(
    history: &[PredictionRecord],
    averages: &AverageSalaryTable,
) -> Vec<ComparisonRow> {
    history
        .last()
        .map(|record| comparison_pair(history.len(), record, averages).to_vec())
        .unwrap_or_default()
}

/// Predicted vs. average for every prediction, in insertion order.
pub fn full_comparison(
    history: &[PredictionRecord],
    averages: &AverageSalaryTable,
) -> Vec<ComparisonRow> {
    history
        .iter()
        .enumerate()
        .flat_map(|(index, record)| comparison_pair(index + 1, record, averages))
        .collect()
}

fn comparison_pair(
    ordinal: usize,
    record: &PredictionRecord,
    averages: &AverageSalaryTable,
) -> [ComparisonRow; 2] {
    let job_title = record.job_title();
    let experience = record.profile().experience();
    [
        ComparisonRow {
            ordinal,
            job_title,
            experience,
            kind: SalaryKind::Predicted,
            salary: Some(record.predicted_salary()),
        },
        ComparisonRow {
            ordinal,
            job_title,
            experience,
            kind: SalaryKind::Average,
            salary: averages.average_for(job_title),
        },
    ]
}
