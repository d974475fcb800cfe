use std::path::{Path, PathBuf};
use std::sync::Arc;

use healing_locator::HealingConfig;
use selfheal_snapshot_store::FsSnapshotStore;

use super::output::OutputFormat;

pub struct CliContext {
    config: Arc<HealingConfig>,
    config_path: PathBuf,
    output: OutputFormat,
}

impl CliContext {
    pub fn new(config: HealingConfig, config_path: PathBuf, output: OutputFormat) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
            output,
        }
    }

    pub fn config(&self) -> &HealingConfig {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    /// Filesystem store rooted at the configured storage location.
    pub fn store(&self) -> FsSnapshotStore {
        FsSnapshotStore::new(&self.config.storage_location)
    }
}
