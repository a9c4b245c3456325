// SleepLog - core/store.rs
//
// Session-scoped, append-only record store.
//
// Insertion order is preserved; nothing is sorted or deduplicated, and
// several records may share a date. All access goes through one mutex so
// the store can be shared via `Arc` between an import worker and the UI
// thread, and every snapshot is a consistent point-in-time copy.

use crate::core::model::SleepRecord;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory ordered collection of the records imported this session.
#[derive(Debug, Default)]
pub struct SessionStore {
    records: Mutex<Vec<SleepRecord>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record at the end.
    pub fn append(&self, record: SleepRecord) {
        self.lock().push(record);
    }

    /// Add a batch at the end under a single lock, so no snapshot ever
    /// observes part of a batch.
    pub fn append_all<I>(&self, records: I)
    where
        I: IntoIterator<Item = SleepRecord>,
    {
        let mut guard = self.lock();
        let before = guard.len();
        guard.extend(records);
        tracing::debug!(added = guard.len() - before, total = guard.len(), "Records appended");
    }

    /// Independent copy of every record, in insertion order.
    ///
    /// Later appends never change a returned snapshot, and changes to the
    /// snapshot never reach the store.
    pub fn snapshot(&self) -> Vec<SleepRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the Vec half-written
    // (push/extend/clone are the only operations), so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Vec<SleepRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
