use clap::Subcommand;

use super::config::ConfigArgs;
use super::snapshots::SnapshotsArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Inspect the healing configuration
    Config(ConfigArgs),

    /// Inspect and manage stored element snapshots
    Snapshots(SnapshotsArgs),
}
