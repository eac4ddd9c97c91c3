use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prediction::PredictionRecord;

/// Opaque, unguessable identifier for one user's prediction session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session-scoped history storage. Each session owns an isolated
/// [`HistoryStore`](super::HistoryStore); nothing is shared between sessions.
pub trait HistoryRepository: Send + Sync {
    fn open(&self) -> Result<SessionId, HistoryError>;
    /// Releases the session and its history.
    fn close(&self, session: &SessionId) -> Result<(), HistoryError>;
    fn contains(&self, session: &SessionId) -> Result<bool, HistoryError>;
    fn append(&self, session: &SessionId, record: PredictionRecord) -> Result<(), HistoryError>;
    fn clear(&self, session: &SessionId) -> Result<(), HistoryError>;
    fn snapshot(&self, session: &SessionId) -> Result<Vec<PredictionRecord>, HistoryError>;
}

/// Error enumeration for history storage failures.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("session not found")]
    SessionNotFound,
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}
