//! Self-healing element locator
//!
//! Resolves a selector against the live page and keeps a snapshot of the
//! element it found. When the selector stops matching, the last snapshot
//! drives an ordered chain of fallback strategies:
//! - attribute: alternate selectors synthesized from recorded attributes/text
//! - nearby: same-tag elements at roughly the recorded position
//! - visual: extension point for image comparison (currently never matches)

pub mod capture;
pub mod chain;
pub mod config;
pub mod errors;
pub mod locator;
pub mod ports;
pub mod selector;
pub mod strategies;
pub mod types;

pub use capture::*;
pub use chain::*;
pub use config::*;
pub use errors::*;
pub use locator::*;
pub use ports::*;
pub use strategies::*;
pub use types::*;

pub use selfheal_snapshot_store::{
    snapshot_key, BoundingBox, ElementSnapshot, FsSnapshotStore, InMemorySnapshotStore,
    SnapshotAttributes, SnapshotStore, StoreError,
};
