mod csv_export;
mod pdf;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::prediction::PredictionRecord;
use crate::report::{history_rows, AverageSalaryTable};

pub use csv_export::{render_csv, CSV_HEADER};
pub use pdf::{render_pdf, PDF_TITLE};

pub const CSV_FILE_NAME: &str = "predictions.csv";
pub const PDF_FILE_NAME: &str = "predictions.pdf";

/// Download formats offered for the prediction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub const fn ordered() -> [Self; 2] {
        [Self::Csv, Self::Pdf]
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Csv => CSV_FILE_NAME,
            Self::Pdf => PDF_FILE_NAME,
        }
    }

    pub fn content_type(self) -> mime::Mime {
        match self {
            Self::Csv => mime::TEXT_CSV,
            Self::Pdf => mime::APPLICATION_PDF,
        }
    }

    /// Serializes the full history, joined with the reference averages.
    pub fn render(
        self,
        history: &[PredictionRecord],
        averages: &AverageSalaryTable,
    ) -> Result<Vec<u8>, ExportError> {
        let rows = history_rows(history, averages);
        match self {
            Self::Csv => render_csv(&rows),
            Self::Pdf => Ok(render_pdf(&rows)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ExportError::UnknownFormat(raw.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format '{0}'")]
    UnknownFormat(String),
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export buffer: {0}")]
    Io(#[from] std::io::Error),
}
