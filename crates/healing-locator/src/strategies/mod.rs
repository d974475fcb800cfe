//! Healing strategies
//!
//! Each strategy gets the stored snapshot and either returns replacement
//! matches or reports that it found nothing. Page failures propagate.

mod attribute;
mod proximity;
mod visual;

pub use attribute::{candidate_selectors, AttributeStrategy};
pub use proximity::{rank_by_overlap, ProximityStrategy};
pub use visual::VisualStrategy;

use async_trait::async_trait;
use selfheal_snapshot_store::ElementSnapshot;

use crate::errors::LocatorError;
use crate::types::{ElementHandle, StrategyKind};

/// Strategy trait for healing a lost selector
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Returns `Some` with at least one element, or `None` when nothing
    /// matched.
    async fn attempt(
        &self,
        snapshot: &ElementSnapshot,
    ) -> Result<Option<Vec<ElementHandle>>, LocatorError>;

    fn kind(&self) -> StrategyKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }
}
