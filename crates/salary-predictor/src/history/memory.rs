use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use super::repository::{HistoryError, HistoryRepository, SessionId};
use super::store::HistoryStore;
use crate::prediction::PredictionRecord;

/// Open sessions kept per process unless configured otherwise.
pub const DEFAULT_MAX_SESSIONS: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(value) => value,
    None => unreachable!(),
};

#[derive(Debug, Default)]
struct SessionTable {
    stores: HashMap<SessionId, HistoryStore>,
    // Open order, oldest first.
    order: VecDeque<SessionId>,
}

/// Process-local session histories guarded by a single mutex, so every
/// append or clear is applied atomically. Opening a session beyond
/// `max_sessions` releases the oldest open session.
#[derive(Debug, Clone)]
pub struct InMemoryHistoryRepository {
    sessions: Arc<Mutex<SessionTable>>,
    limit: Option<NonZeroUsize>,
    max_sessions: NonZeroUsize,
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::new(None)
    }
}

impl InMemoryHistoryRepository {
    pub fn new(limit: Option<NonZeroUsize>) -> Self {
        Self {
            sessions: Arc::default(),
            limit,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn with_max_sessions(mut self, max_sessions: NonZeroUsize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    pub fn max_sessions(&self) -> NonZeroUsize {
        self.max_sessions
    }

    pub fn session_count(&self) -> Result<usize, HistoryError> {
        Ok(self.lock()?.stores.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionTable>, HistoryError> {
        self.sessions
            .lock()
            .map_err(|_| HistoryError::Unavailable("session mutex poisoned".to_string()))
    }

    fn with_store<T>(
        &self,
        session: &SessionId,
        action: impl FnOnce(&mut HistoryStore) -> T,
    ) -> Result<T, HistoryError> {
        let mut table = self.lock()?;
        let store = table
            .stores
            .get_mut(session)
            .ok_or(HistoryError::SessionNotFound)?;
        Ok(action(store))
    }
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn open(&self) -> Result<SessionId, HistoryError> {
        let id = SessionId::generate();
        let mut table = self.lock()?;

        while table.order.len() >= self.max_sessions.get() {
            let Some(oldest) = table.order.pop_front() else {
                break;
            };
            table.stores.remove(&oldest);
            debug!(session = %oldest, "session limit reached, released oldest session");
        }

        table
            .stores
            .insert(id.clone(), HistoryStore::with_limit(self.limit));
        table.order.push_back(id.clone());
        Ok(id)
    }

    fn close(&self, session: &SessionId) -> Result<(), HistoryError> {
        let mut table = self.lock()?;
        if table.stores.remove(session).is_none() {
            return Err(HistoryError::SessionNotFound);
        }
        table.order.retain(|open| open != session);
        Ok(())
    }

    fn contains(&self, session: &SessionId) -> Result<bool, HistoryError> {
        Ok(self.lock()?.stores.contains_key(session))
    }

    fn append(&self, session: &SessionId, record: PredictionRecord) -> Result<(), HistoryError> {
        self.with_store(session, |store| {
            store.append(record);
        })
    }

    fn clear(&self, session: &SessionId) -> Result<(), HistoryError> {
        self.with_store(session, HistoryStore::clear)
    }

    fn snapshot(&self, session: &SessionId) -> Result<Vec<PredictionRecord>, HistoryError> {
        self.with_store(session, |store| store.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{City, Education, EmployeeProfile, Industry, JobTitle};

    fn record(salary: u64) -> PredictionRecord {
        let profile = EmployeeProfile::new(
            10,
            35,
            Education::PhD,
            JobTitle::DevOpsEngineer,
            Industry::Telecom,
            City::Chennai,
        )
        .expect("valid profile");
        PredictionRecord::new(profile, salary)
    }

    #[test]
    fn sessions_are_isolated() {
        let repository = InMemoryHistoryRepository::default();
        let first = repository.open().expect("open first");
        let second = repository.open().expect("open second");
        assert_ne!(first, second);

        repository.append(&first, record(1)).expect("append");
        repository.append(&first, record(2)).expect("append");
        repository.append(&second, record(3)).expect("append");
        repository.clear(&second).expect("clear");

        assert_eq!(
            repository.snapshot(&first).expect("snapshot"),
            vec![record(1), record(2)]
        );
        assert!(repository.snapshot(&second).expect("snapshot").is_empty());
        assert_eq!(repository.session_count().expect("count"), 2);
    }

    #[test]
    fn unknown_session_is_reported() {
        let repository = InMemoryHistoryRepository::default();
        let missing = SessionId("missing".to_string());

        assert!(!repository.contains(&missing).expect("lookup"));
        assert!(matches!(
            repository.append(&missing, record(1)),
            Err(HistoryError::SessionNotFound)
        ));
        assert!(matches!(
            repository.snapshot(&missing),
            Err(HistoryError::SessionNotFound)
        ));
        assert!(matches!(
            repository.close(&missing),
            Err(HistoryError::SessionNotFound)
        ));
    }

    #[test]
    fn repository_applies_configured_limit() {
        let repository = InMemoryHistoryRepository::new(NonZeroUsize::new(1));
        let session = repository.open().expect("open");
        repository.append(&session, record(1)).expect("append");
        repository.append(&session, record(2)).expect("append");

        assert_eq!(
            repository.snapshot(&session).expect("snapshot"),
            vec![record(2)]
        );
    }

    #[test]
    fn close_releases_the_session() {
        let repository = InMemoryHistoryRepository::default();
        let kept = repository.open().expect("open kept");
        let closed = repository.open().expect("open closed");
        repository.append(&closed, record(1)).expect("append");

        repository.close(&closed).expect("close");

        assert!(!repository.contains(&closed).expect("lookup"));
        assert!(repository.contains(&kept).expect("lookup"));
        assert_eq!(repository.session_count().expect("count"), 1);
        assert!(matches!(
            repository.snapshot(&closed),
            Err(HistoryError::SessionNotFound)
        ));
    }

    #[test]
    fn repeated_opens_stay_within_session_cap() {
        let repository = InMemoryHistoryRepository::new(NonZeroUsize::new(1));
        let sessions: Vec<SessionId> = (0..10_000)
            .map(|_| repository.open().expect("open"))
            .collect();

        assert_eq!(
            repository.session_count().expect("count"),
            DEFAULT_MAX_SESSIONS.get()
        );
        assert!(!repository.contains(&sessions[0]).expect("lookup"));
        assert!(repository.contains(&sessions[9_999]).expect("lookup"));
    }

    #[test]
    fn session_cap_releases_oldest_first() {
        let cap = NonZeroUsize::new(2).expect("non-zero");
        let repository = InMemoryHistoryRepository::default().with_max_sessions(cap);
        let first = repository.open().expect("open");
        let second = repository.open().expect("open");
        repository.close(&first).expect("close");
        let third = repository.open().expect("open");
        let fourth = repository.open().expect("open");

        assert_eq!(repository.session_count().expect("count"), 2);
        assert!(!repository.contains(&second).expect("lookup"));
        assert!(repository.contains(&third).expect("lookup"));
        assert!(repository.contains(&fourth).expect("lookup"));
    }
}
