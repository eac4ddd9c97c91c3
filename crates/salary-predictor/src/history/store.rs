use std::collections::VecDeque;
use std::num::NonZeroUsize;

use tracing::debug;

use crate::prediction::PredictionRecord;

/// Chronological prediction log for one session.
///
/// Records are only ever appended or cleared wholesale. An optional limit
/// turns the log into a sliding window that drops the oldest record first.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: VecDeque<PredictionRecord>,
    limit: Option<NonZeroUsize>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<NonZeroUsize>) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }

    /// Appends a record, returning the record evicted to honour the limit.
    pub fn append(&mut self, record: PredictionRecord) -> Option<PredictionRecord> {
        let evicted = match self.limit {
            Some(limit) if self.records.len() >= limit.get() => self.records.pop_front(),
            _ => None,
        };
        if evicted.is_some() {
            debug!(limit = ?self.limit, "history limit reached, evicted oldest prediction");
        }
        self.records.push_back(record);
        evicted
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Owned copy of the history in insertion order.
    pub fn snapshot(&self) -> Vec<PredictionRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&PredictionRecord> {
        self.records.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PredictionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
