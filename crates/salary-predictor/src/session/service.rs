use std::sync::Arc;

use tracing::info;

use crate::export::{ExportError, ExportFormat};
use crate::history::{HistoryError, HistoryRepository, SessionId};
use crate::prediction::{
    EmployeeInput, PredictionError, PredictionRecord, PredictionService, SalaryModel,
};
use crate::report::{self, AverageSalaryTable, ComparisonRow, HistoryRow};

/// Service composing the prediction service, session histories, and the
/// reference averages. Views and exports always read the current history.
pub struct SalarySessionService<M, R> {
    predictor: PredictionService<M>,
    histories: Arc<R>,
    averages: Arc<AverageSalaryTable>,
}

impl<M, R> SalarySessionService<M, R>
where
    M: SalaryModel + 'static,
    R: HistoryRepository + 'static,
{
    pub fn new(model: Arc<M>, histories: Arc<R>, averages: Arc<AverageSalaryTable>) -> Self {
        Self {
            predictor: PredictionService::new(model),
            histories,
            averages,
        }
    }

    pub fn open_session(&self) -> Result<SessionId, SessionServiceError> {
        let session = self.histories.open()?;
        info!(%session, "prediction session opened");
        Ok(session)
    }

    pub fn close_session(&self, session: &SessionId) -> Result<(), SessionServiceError> {
        self.histories.close(session)?;
        info!(%session, "prediction session closed");
        Ok(())
    }

    /// Predict, then record. A failed prediction leaves the history untouched.
    pub fn predict(
        &self,
        session: &SessionId,
        input: &EmployeeInput,
    ) -> Result<PredictionRecord, SessionServiceError> {
        if !self.histories.contains(session)? {
            return Err(HistoryError::SessionNotFound.into());
        }

        let record = self.predictor.predict_input(input)?;
        self.histories.append(session, record.clone())?;
        Ok(record)
    }

    pub fn history(
        &self,
        session: &SessionId,
    ) -> Result<Vec<PredictionRecord>, SessionServiceError> {
        Ok(self.histories.snapshot(session)?)
    }

    /// History joined with reference averages, as shown in the history table.
    pub fn history_rows(
        &self,
        session: &SessionId,
    ) -> Result<Vec<HistoryRow>, SessionServiceError> {
        let history = self.histories.snapshot(session)?;
        Ok(report::history_rows(&history, &self.averages))
    }

    pub fn clear(&self, session: &SessionId) -> Result<(), SessionServiceError> {
        self.histories.clear(session)?;
        info!(%session, "prediction history cleared");
        Ok(())
    }

    pub fn latest_comparison(
        &self,
        session: &SessionId,
    ) -> Result<Vec<ComparisonRow>, SessionServiceError> {
        let history = self.histories.snapshot(session)?;
        Ok(report::latest_comparison(&history, &self.averages))
    }

    pub fn full_comparison(
        &self,
        session: &SessionId,
    ) -> Result<Vec<ComparisonRow>, SessionServiceError> {
        let history = self.histories.snapshot(session)?;
        Ok(report::full_comparison(&history, &self.averages))
    }

    pub fn export(
        &self,
        session: &SessionId,
        format: ExportFormat,
    ) -> Result<Vec<u8>, SessionServiceError> {
        let history = self.histories.snapshot(session)?;
        let bytes = format.render(&history, &self.averages)?;
        info!(%session, ?format, records = history.len(), bytes = bytes.len(), "history exported");
        Ok(bytes)
    }
}

/// Short confirmation shown after a successful prediction.
pub fn estimate_notice(record: &PredictionRecord) -> String {
    format!(
        "Estimated Salary: ₹{}",
        report::format_thousands(record.predicted_salary())
    )
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
