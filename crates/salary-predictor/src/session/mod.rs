//! Per-session prediction workflow: predict, record, compare, export.

mod router;
mod service;

#[cfg(test)]
mod tests;

pub use router::{
    session_router, ClearResponse, ComparisonView, HistoryView, OptionsView, PredictionResponse,
    SessionOpened, SliderRange,
};
pub use service::{estimate_notice, SalarySessionService, SessionServiceError};
