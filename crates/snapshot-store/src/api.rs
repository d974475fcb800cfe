use async_trait::async_trait;

use crate::errors::StoreError;
use crate::model::ElementSnapshot;

pub type StoreResult<T> = Result<T, StoreError>;

/// Key/value contract for element snapshots.
///
/// Keys come from [`crate::snapshot_key`]. The backing medium is up to the
/// implementation; healing logic only relies on these two operations.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Stores `snapshot` under `key`, replacing any previous snapshot.
    async fn write(&self, key: &str, snapshot: &ElementSnapshot) -> StoreResult<()>;

    /// Returns the snapshot stored under `key`. A missing key is `Ok(None)`.
    async fn read(&self, key: &str) -> StoreResult<Option<ElementSnapshot>>;
}
