//! Durable element snapshots for the self-healing locator.
//!
//! A snapshot records the last known-good state of an element (tag, text,
//! recognized attributes and geometry). Snapshots are keyed by a sanitized
//! form of the selector that found them; the store keeps only the latest one
//! per key.

pub mod api;
pub mod errors;
pub mod fs;
pub mod index;
pub mod key;
pub mod model;

pub use api::{SnapshotStore, StoreResult};
pub use errors::{StoreErrKind, StoreError};
pub use fs::FsSnapshotStore;
pub use index::mem::InMemorySnapshotStore;
pub use key::snapshot_key;
pub use model::{BoundingBox, ElementSnapshot, SnapshotAttributes, RECOGNIZED_ATTRIBUTES};
