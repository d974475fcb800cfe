use std::sync::Arc;

use async_trait::async_trait;
use selfheal_snapshot_store::{ElementSnapshot, SnapshotAttributes};
use tracing::debug;

use super::Strategy;
use crate::errors::LocatorError;
use crate::ports::PagePort;
use crate::selector::escape_ident;
use crate::types::{ElementHandle, ElementState, StrategyKind};

/// Finds same-tag elements still sitting where the snapshot recorded the
/// original, then prefers those sharing the most recorded attributes.
pub struct ProximityStrategy {
    page: Arc<dyn PagePort>,
    tolerance: f64,
}

impl ProximityStrategy {
    pub fn new(page: Arc<dyn PagePort>, tolerance: f64) -> Self {
        Self { page, tolerance }
    }
}

#[async_trait]
impl Strategy for ProximityStrategy {
    async fn attempt(
        &self,
        snapshot: &ElementSnapshot,
    ) -> Result<Option<Vec<ElementHandle>>, LocatorError> {
        if snapshot.tag_name.is_empty() {
            return Ok(None);
        }

        let same_tag = self.page.find(&escape_ident(&snapshot.tag_name)).await?;
        let mut nearby = Vec::new();
        for element in same_tag {
            let state = self.page.describe(&element).await?;
            if state
                .bounding_box
                .within(&snapshot.bounding_box, self.tolerance)
            {
                nearby.push((element, state));
            }
        }

        debug!(
            tag = %snapshot.tag_name,
            candidates = nearby.len(),
            tolerance = self.tolerance,
            "geometric filter applied"
        );
        if nearby.is_empty() {
            return Ok(None);
        }
        Ok(Some(rank_by_overlap(&snapshot.attributes, nearby)))
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Nearby
    }
}

/// Keeps the candidates with the highest attribute-overlap score. When no
/// candidate shares any recorded attribute, all of them are kept.
pub fn rank_by_overlap(
    recorded: &SnapshotAttributes,
    candidates: Vec<(ElementHandle, ElementState)>,
) -> Vec<ElementHandle> {
    let scored: Vec<(ElementHandle, usize)> = candidates
        .into_iter()
        .map(|(element, state)| {
            let score = overlap_score(recorded, &state);
            (element, score)
        })
        .collect();

    let best = scored.iter().map(|(_, score)| *score).max().unwrap_or(0);
    scored
        .into_iter()
        .filter(|(_, score)| best == 0 || *score == best)
        .map(|(element, _)| element)
        .collect()
}

fn overlap_score(recorded: &SnapshotAttributes, state: &ElementState) -> usize {
    recorded
        .present()
        .filter(|(name, value)| state.attribute(name) == Some(*value))
        .count()
}
