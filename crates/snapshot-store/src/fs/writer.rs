use std::io;
use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::StoreError;
use crate::model::ElementSnapshot;

pub async fn write_snapshot(path: &Path, snapshot: &ElementSnapshot) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(snapshot).map_err(StoreError::corrupt)?;
    write_atomic(path, &data).await?;
    Ok(())
}

/// Returns whether a file was removed.
pub async fn remove_file(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

async fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("tmp");
    let mut file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)
        .await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(tmp, path).await
}
