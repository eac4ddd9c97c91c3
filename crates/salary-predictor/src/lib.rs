//! Salary estimation for employee profiles, with per-session prediction
//! history, comparison against reference averages, and CSV/PDF export.

pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod prediction;
pub mod report;
pub mod session;
pub mod telemetry;
