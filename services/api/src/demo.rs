use crate::infra::load_model;
use clap::Args;
use salary_predictor::config::AppConfig;
use salary_predictor::error::AppError;
use salary_predictor::export::ExportFormat;
use salary_predictor::history::InMemoryHistoryRepository;
use salary_predictor::prediction::domain::{DEFAULT_AGE, DEFAULT_EXPERIENCE};
use salary_predictor::prediction::{EmployeeInput, PredictionService};
use salary_predictor::report::{
    format_thousands, latest_comparison, standard_averages, AverageSalaryTable, ComparisonRow,
    FULL_COMPARISON_TITLE, LATEST_COMPARISON_TITLE,
};
use salary_predictor::session::{estimate_notice, SalarySessionService};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Education level (Bachelor, Master, PhD)
    #[arg(long, default_value = "Bachelor")]
    pub(crate) education: String,
    /// Job title (e.g. "Data Scientist")
    #[arg(long)]
    pub(crate) job_title: String,
    /// Industry (IT, Retail, Manufacturing, Telecom)
    #[arg(long, default_value = "IT")]
    pub(crate) industry: String,
    /// City (Mumbai, Delhi, Bangalore, Chennai, Hyderabad, Pune)
    #[arg(long, default_value = "Mumbai")]
    pub(crate) city: String,
    /// Years of experience (0-40)
    #[arg(long, default_value_t = i64::from(DEFAULT_EXPERIENCE))]
    pub(crate) experience: i64,
    /// Age in years (20-65)
    #[arg(long, default_value_t = i64::from(DEFAULT_AGE))]
    pub(crate) age: i64,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Directory that receives predictions.csv and predictions.pdf
    #[arg(long, default_value = ".")]
    pub(crate) output_dir: PathBuf,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Clear the session history after exporting
    #[arg(long)]
    pub(crate) clear: bool,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        education,
        job_title,
        industry,
        city,
        experience,
        age,
        model,
    } = args;

    let config = AppConfig::load()?;
    let predictor = PredictionService::new(load_model(&config, model)?);

    let input = EmployeeInput {
        experience,
        age,
        education,
        job_title,
        industry,
        city,
    };
    let record = predictor.predict_input(&input)?;

    println!("{}", estimate_notice(&record));
    print_comparison(
        LATEST_COMPARISON_TITLE,
        &latest_comparison(std::slice::from_ref(&record), standard_averages()),
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        output_dir,
        model,
        clear,
    } = args;

    let config = AppConfig::load()?;
    let model = load_model(&config, model)?;
    let service = SalarySessionService::new(
        model,
        Arc::new(
            InMemoryHistoryRepository::new(config.history.max_records)
                .with_max_sessions(config.history.max_sessions),
        ),
        Arc::new(AverageSalaryTable::standard()),
    );

    println!("Employee salary prediction demo");
    let session = service.open_session()?;

    for input in demo_inputs() {
        let record = service.predict(&session, &input)?;
        let profile = record.profile();
        println!(
            "- {} | {} | {} | {} | exp {} | age {} -> {}",
            profile.job_title(),
            profile.education(),
            profile.industry(),
            profile.city(),
            profile.experience(),
            profile.age(),
            estimate_notice(&record)
        );
    }

    print_comparison(LATEST_COMPARISON_TITLE, &service.latest_comparison(&session)?);
    print_comparison(FULL_COMPARISON_TITLE, &service.full_comparison(&session)?);

    std::fs::create_dir_all(&output_dir)?;
    println!("\nExport predictions");
    for format in ExportFormat::ordered() {
        let bytes = service.export(&session, format)?;
        let path = output_dir.join(format.file_name());
        std::fs::write(&path, &bytes)?;
        println!("- {} ({} bytes, {})", path.display(), bytes.len(), format.content_type());
    }

    if clear {
        service.clear(&session)?;
        println!("\nPrediction history cleared!");
    }

    service.close_session(&session)?;

    Ok(())
}

fn print_comparison(title: &str, rows: &[ComparisonRow]) {
    println!("\n{title}");
    if rows.is_empty() {
        println!("No predictions available yet to export.");
        return;
    }

    for row in rows {
        let salary = row
            .salary
            .map(|value| format!("₹{}", format_thousands(value)))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  #{} {} (exp {}): {} = {}",
            row.ordinal,
            row.job_title,
            row.experience,
            row.kind.label(),
            salary
        );
    }
}

fn demo_inputs() -> Vec<EmployeeInput> {
    let profiles = [
        (2, 24, "Bachelor", "Web Developer", "Retail", "Pune"),
        (5, 30, "Bachelor", "Data Scientist", "IT", "Mumbai"),
        (8, 34, "Master", "UI/UX Designer", "Telecom", "Bangalore"),
        (12, 38, "PhD", "DevOps Engineer", "Manufacturing", "Hyderabad"),
        (15, 41, "Master", "Data Scientist", "IT", "Delhi"),
    ];

    profiles
        .into_iter()
        .map(
            |(experience, age, education, job_title, industry, city)| EmployeeInput {
                experience,
                age,
                education: education.to_string(),
                job_title: job_title.to_string(),
                industry: industry.to_string(),
                city: city.to_string(),
            },
        )
        .collect()
}
