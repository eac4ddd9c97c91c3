use crate::demo::{run_demo, run_predict, DemoArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use salary_predictor::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Employee Salary Predictor",
    about = "Estimate salaries from experience, age, and role, and export prediction history",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate one salary and compare it with the role average
    Predict(PredictArgs),
    /// Run a scripted session and write predictions.csv / predictions.pdf
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Demo(args) => run_demo(args),
    }
}
