mod memory;
mod repository;
mod store;

pub use memory::{InMemoryHistoryRepository, DEFAULT_MAX_SESSIONS};
pub use repository::{HistoryError, HistoryRepository, SessionId};
pub use store::HistoryStore;
