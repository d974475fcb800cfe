pub mod app;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod output;
pub mod runtime;
pub mod snapshots;

pub use config::{cmd_config, ConfigArgs};
pub use snapshots::{cmd_snapshots, SnapshotsArgs};
