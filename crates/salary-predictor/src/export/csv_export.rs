use serde::Serialize;

use super::ExportError;
use crate::report::HistoryRow;

pub const CSV_HEADER: [&str; 8] = [
    "Experience",
    "Age",
    "Education",
    "Job_Title",
    "Industry",
    "City",
    "Predicted_Salary",
    "Avg_Salary",
];

#[derive(Debug, Serialize)]
struct CsvRow {
    experience: u8,
    age: u8,
    education: &'static str,
    job_title: &'static str,
    industry: &'static str,
    city: &'static str,
    predicted_salary: u64,
    avg_salary: Option<u64>,
}

impl From<&HistoryRow> for CsvRow {
    fn from(row: &HistoryRow) -> Self {
        let profile = row.record.profile();
        Self {
            experience: profile.experience(),
            age: profile.age(),
            education: profile.education().label(),
            job_title: profile.job_title().label(),
            industry: profile.industry().label(),
            city: profile.city().label(),
            predicted_salary: row.record.predicted_salary(),
            avg_salary: row.average_salary,
        }
    }
}

/// UTF-8 CSV with a header row, one line per prediction and no index column.
/// The header is written explicitly so an empty history still yields it.
pub fn render_csv(rows: &[HistoryRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(CsvRow::from(row))?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}
