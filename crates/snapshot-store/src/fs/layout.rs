use std::path::{Path, PathBuf};

pub const ELEMENTS_DIR: &str = "elements";
pub const SNAPSHOT_EXT: &str = "json";

pub fn elements_dir(root: &Path) -> PathBuf {
    root.join(ELEMENTS_DIR)
}

pub fn snapshot_path(root: &Path, key: &str) -> PathBuf {
    let mut path = elements_dir(root);
    path.push(format!("{key}.{SNAPSHOT_EXT}"));
    path
}

/// Recovers the key from a snapshot file name, `None` for foreign files.
pub fn key_from_path(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != SNAPSHOT_EXT {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}
