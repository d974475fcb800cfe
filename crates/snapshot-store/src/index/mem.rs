use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::api::{SnapshotStore, StoreResult};
use crate::key::validate_key;
use crate::model::ElementSnapshot;

/// Process-local store. Useful for embedders that keep snapshots for the
/// lifetime of a single run, and for tests.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshots: DashMap<String, ElementSnapshot>,
    writes: AtomicU64,
    reads: AtomicU64,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<ElementSnapshot> {
        self.snapshots.get(key).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of `write` calls served so far.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn write(&self, key: &str, snapshot: &ElementSnapshot) -> StoreResult<()> {
        validate_key(key)?;
        self.snapshots.insert(key.to_string(), snapshot.clone());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn read(&self, key: &str) -> StoreResult<Option<ElementSnapshot>> {
        validate_key(key)?;
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.get(key))
    }
}
