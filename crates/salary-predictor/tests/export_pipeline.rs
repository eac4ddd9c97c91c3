use salary_predictor::export::{render_pdf, ExportFormat, CSV_HEADER, PDF_TITLE};
use salary_predictor::prediction::{
    City, Education, EmployeeProfile, Industry, JobTitle, PredictionRecord,
};
use salary_predictor::report::{history_rows, standard_averages};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct ExportedRow {
    #[serde(rename = "Experience")]
    experience: u8,
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "Education")]
    education: Education,
    #[serde(rename = "Job_Title")]
    job_title: JobTitle,
    #[serde(rename = "Industry")]
    industry: Industry,
    #[serde(rename = "City")]
    city: City,
    #[serde(rename = "Predicted_Salary")]
    predicted_salary: u64,
    #[serde(rename = "Avg_Salary")]
    avg_salary: Option<u64>,
}

fn record(
    experience: i64,
    age: i64,
    education: Education,
    job_title: JobTitle,
    industry: Industry,
    city: City,
    salary: u64,
) -> PredictionRecord {
    let profile = EmployeeProfile::new(experience, age, education, job_title, industry, city)
        .expect("valid profile");
    PredictionRecord::new(profile, salary)
}

fn history() -> Vec<PredictionRecord> {
    vec![
        record(
            5,
            30,
            Education::Bachelor,
            JobTitle::DataScientist,
            Industry::It,
            City::Mumbai,
            812_345,
        ),
        record(
            12,
            38,
            Education::PhD,
            JobTitle::DevOpsEngineer,
            Industry::Telecom,
            City::Bangalore,
            1_734_020,
        ),
        record(
            0,
            22,
            Education::Master,
            JobTitle::UiUxDesigner,
            Industry::Retail,
            City::Chennai,
            0,
        ),
    ]
}

#[test]
fn csv_round_trip_preserves_records_and_order() {
    let history = history();
    let bytes = ExportFormat::Csv
        .render(&history, standard_averages())
        .expect("csv export");

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let headers: Vec<String> = reader
        .headers()
        .expect("header row")
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(headers, CSV_HEADER.to_vec());

    let rows: Vec<ExportedRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(rows.len(), history.len());

    for (row, record) in rows.iter().zip(&history) {
        let profile = record.profile();
        assert_eq!(row.experience, profile.experience());
        assert_eq!(row.age, profile.age());
        assert_eq!(row.education, profile.education());
        assert_eq!(row.job_title, profile.job_title());
        assert_eq!(row.industry, profile.industry());
        assert_eq!(row.city, profile.city());
        assert_eq!(row.predicted_salary, record.predicted_salary());
        assert_eq!(
            row.avg_salary,
            standard_averages().average_for(profile.job_title())
        );
    }
}

#[test]
fn empty_history_csv_is_header_only() {
    let bytes = ExportFormat::Csv
        .render(&[], standard_averages())
        .expect("csv export");
    let text = String::from_utf8(bytes).expect("utf-8");
    assert_eq!(text.lines().collect::<Vec<_>>(), vec![CSV_HEADER.join(",")]);
}

#[test]
fn pdf_is_deterministic() {
    let history = history();
    let first = ExportFormat::Pdf
        .render(&history, standard_averages())
        .expect("pdf export");
    let second = ExportFormat::Pdf
        .render(&history.clone(), standard_averages())
        .expect("pdf export");
    assert_eq!(first, second);
}

#[test]
fn pdf_lists_records_in_history_order() {
    let rows = history_rows(&history(), standard_averages());
    let pdf = String::from_utf8_lossy(&render_pdf(&rows)).into_owned();

    let first = pdf
        .find("(1. Data Scientist | Exp: 5 | Age: 30 | City: Mumbai | Predicted Salary: Rs. 812,345) Tj")
        .expect("first line");
    let second = pdf.find("(2. DevOps Engineer").expect("second line");
    let third = pdf.find("(3. UI/UX Designer").expect("third line");
    assert!(first < second && second < third);
}

#[test]
fn empty_history_pdf_has_only_the_title() {
    let pdf = String::from_utf8_lossy(&render_pdf(&[])).into_owned();
    assert_eq!(pdf.matches(") Tj").count(), 1);
    assert!(pdf.contains(&format!("({PDF_TITLE}) Tj")));
    assert!(!pdf.contains("Predicted Salary"));
}
