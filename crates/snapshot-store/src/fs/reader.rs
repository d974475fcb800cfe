use std::io;
use std::path::Path;

use tokio::fs;

use crate::errors::StoreError;
use crate::model::ElementSnapshot;

/// Reads a snapshot file, `Ok(None)` when it does not exist.
pub async fn read_snapshot(path: &Path) -> Result<Option<ElementSnapshot>, StoreError> {
    let raw = match fs::read(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|err| StoreError::corrupt(format!("{}: {err}", path.display())))
}
