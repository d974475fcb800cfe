//! Snapshot capture from a live match

use std::sync::Arc;

use chrono::{DateTime, Utc};
use selfheal_snapshot_store::{ElementSnapshot, SnapshotAttributes};
use tracing::debug;

use crate::errors::PageError;
use crate::ports::PagePort;
use crate::types::{ElementHandle, ElementState};

/// Turns a matched element into an [`ElementSnapshot`].
pub struct SnapshotCapture {
    page: Arc<dyn PagePort>,
}

impl SnapshotCapture {
    pub fn new(page: Arc<dyn PagePort>) -> Self {
        Self { page }
    }

    pub async fn capture(
        &self,
        element: &ElementHandle,
        selector: &str,
    ) -> Result<ElementSnapshot, PageError> {
        let state = self.page.describe(element).await?;
        debug!(selector, element = %element, tag = %state.tag_name, "capturing snapshot");
        Ok(snapshot_from_state(selector, &state, Utc::now()))
    }
}

/// Normalizes observed state: lower-cased tag, trimmed text, recognized
/// attributes only.
pub fn snapshot_from_state(
    selector: &str,
    state: &ElementState,
    captured_at: DateTime<Utc>,
) -> ElementSnapshot {
    ElementSnapshot {
        selector: selector.to_string(),
        tag_name: state.tag_name.to_lowercase(),
        text: state.text.trim().to_string(),
        attributes: SnapshotAttributes::from_lookup(|name| {
            state.attribute(name).map(str::to_string)
        }),
        bounding_box: state.bounding_box,
        captured_at,
    }
}
