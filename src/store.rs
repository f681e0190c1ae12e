//! Anomaly store
//!
//! Shared mutable home of every [`AnomalyRecord`]: an id index plus an
//! insertion-ordered list behind one `parking_lot::RwLock`, so readers always
//! see whole records and concurrent writers never lose an insert. Insertion
//! order is the store's native order; timestamp ordering is applied at query
//! time. Records are never deleted here (retention is out of scope).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::models::AnomalyRecord;

#[derive(Debug, Default)]
struct Inner {
    /// id -> position in `ordered`
    index: HashMap<u64, usize>,
    /// Records in insertion order
    ordered: Vec<AnomalyRecord>,
}

/// Concurrent record store with monotonic id allocation.
#[derive(Debug, Default)]
pub struct AnomalyStore {
    inner: RwLock<Inner>,
    next_id: AtomicU64,
}

impl AnomalyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh record identifier. Ids are unique for the lifetime of
    /// the store and never reused.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Insert a record at the end of the insertion order.
    pub fn insert(&self, record: AnomalyRecord) {
        let mut inner = self.inner.write();
        let pos = inner.ordered.len();
        inner.index.insert(record.id, pos);
        inner.ordered.push(record);
    }

    /// Look up a record by id.
    pub fn get(&self, id: u64) -> Option<AnomalyRecord> {
        let inner = self.inner.read();
        inner.index.get(&id).map(|&pos| inner.ordered[pos].clone())
    }

    /// Consistent copy of every record, in insertion order.
    pub fn snapshot(&self) -> Vec<AnomalyRecord> {
        self.inner.read().ordered.clone()
    }

    /// Mark a record as handled. Returns false and changes nothing when the
    /// id is unknown; re-acknowledging is a no-op that still returns true.
    /// The flag only ever moves false -> true.
    pub fn acknowledge(&self, id: u64) -> bool {
        let mut inner = self.inner.write();
        match inner.index.get(&id).copied() {
            Some(pos) => {
                inner.ordered[pos].acknowledged = true;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
