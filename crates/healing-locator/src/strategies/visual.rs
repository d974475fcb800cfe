use async_trait::async_trait;
use selfheal_snapshot_store::ElementSnapshot;
use tracing::debug;

use super::Strategy;
use crate::errors::LocatorError;
use crate::types::{ElementHandle, StrategyKind};

/// Extension point for image-similarity matching.
///
/// A real implementation would compare a fresh screenshot of candidate
/// regions against one stored at capture time, accepting matches at or above
/// `tolerance_level`. Until then it never matches. Replace it through
/// [`crate::StrategyChain::register`]; no other contract changes.
pub struct VisualStrategy {
    tolerance_level: f64,
}

impl VisualStrategy {
    pub fn new(tolerance_level: f64) -> Self {
        Self { tolerance_level }
    }

    pub fn tolerance_level(&self) -> f64 {
        self.tolerance_level
    }
}

#[async_trait]
impl Strategy for VisualStrategy {
    async fn attempt(
        &self,
        snapshot: &ElementSnapshot,
    ) -> Result<Option<Vec<ElementHandle>>, LocatorError> {
        debug!(
            selector = %snapshot.selector,
            tolerance = self.tolerance_level,
            "visual healing not implemented"
        );
        Ok(None)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Visual
    }
}
