//! Filesystem backend: one pretty-printed JSON file per key under
//! `<root>/elements/`.

pub mod layout;
pub mod reader;
pub mod writer;

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::api::{SnapshotStore, StoreResult};
use crate::key::validate_key;
use crate::model::ElementSnapshot;

#[derive(Clone, Debug)]
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        layout::snapshot_path(&self.root, key)
    }

    /// All readable snapshots, sorted by key. Unreadable files are logged and
    /// skipped.
    pub async fn list(&self) -> StoreResult<Vec<(String, ElementSnapshot)>> {
        let dir = layout::elements_dir(&self.root);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(key) = layout::key_from_path(&path) else {
                continue;
            };
            match reader::read_snapshot(&path).await {
                Ok(Some(snapshot)) => records.push((key, snapshot)),
                Ok(None) => {}
                Err(err) => warn!(path = %path.display(), %err, "skipping unreadable snapshot"),
            }
        }
        records.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(records)
    }

    /// Returns whether a snapshot existed for `key`.
    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(writer::remove_file(&self.path_for(key)).await?)
    }

    /// Removes every snapshot file, readable or not, and returns how many
    /// were deleted.
    pub async fn clear(&self) -> StoreResult<usize> {
        let dir = layout::elements_dir(&self.root);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(key) = layout::key_from_path(&path) else {
                continue;
            };
            if validate_key(&key).is_err() {
                continue;
            }
            if writer::remove_file(&path).await? {
                removed += 1;
            }
        }
        debug!(dir = %dir.display(), removed, "snapshots cleared");
        Ok(removed)
    }
}

#[async_trait]
impl SnapshotStore for FsSnapshotStore {
    async fn write(&self, key: &str, snapshot: &ElementSnapshot) -> StoreResult<()> {
        validate_key(key)?;
        let path = self.path_for(key);
        writer::write_snapshot(&path, snapshot).await?;
        debug!(path = %path.display(), "snapshot written");
        Ok(())
    }

    async fn read(&self, key: &str) -> StoreResult<Option<ElementSnapshot>> {
        validate_key(key)?;
        reader::read_snapshot(&self.path_for(key)).await
    }
}
