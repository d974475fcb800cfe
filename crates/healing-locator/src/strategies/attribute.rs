use std::sync::Arc;

use async_trait::async_trait;
use selfheal_snapshot_store::ElementSnapshot;
use tracing::debug;

use super::Strategy;
use crate::errors::LocatorError;
use crate::ports::PagePort;
use crate::selector;
use crate::types::{ElementHandle, StrategyKind};

/// Tries selectors synthesized from the snapshot's attributes and text.
pub struct AttributeStrategy {
    page: Arc<dyn PagePort>,
}

impl AttributeStrategy {
    pub fn new(page: Arc<dyn PagePort>) -> Self {
        Self { page }
    }
}

#[async_trait]
impl Strategy for AttributeStrategy {
    async fn attempt(
        &self,
        snapshot: &ElementSnapshot,
    ) -> Result<Option<Vec<ElementHandle>>, LocatorError> {
        for candidate in candidate_selectors(snapshot) {
            let found = self.page.find(&candidate).await?;
            if !found.is_empty() {
                debug!(candidate = %candidate, matches = found.len(), "attribute candidate matched");
                return Ok(Some(found));
            }
            debug!(candidate = %candidate, "attribute candidate missed");
        }
        Ok(None)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Attribute
    }
}

/// Candidate selectors in priority order: id, name, class combination,
/// tag + text, then tag qualified by every remaining recognized attribute.
pub fn candidate_selectors(snapshot: &ElementSnapshot) -> Vec<String> {
    let attrs = &snapshot.attributes;
    let mut selectors = Vec::new();

    if let Some(id) = attrs.id.as_deref().filter(|id| !id.is_empty()) {
        selectors.push(selector::id_selector(id));
    }

    if let Some(name) = attrs.name.as_deref().filter(|name| !name.is_empty()) {
        selectors.push(selector::attribute_predicate("name", name));
    }

    if let Some(classes) = selector::class_selector(attrs.class_tokens()) {
        selectors.push(classes);
    }

    if !snapshot.text.is_empty() {
        selectors.push(selector::text_selector(&snapshot.tag_name, &snapshot.text));
    }

    let combined = attrs
        .present()
        .filter(|(name, _)| !matches!(*name, "id" | "class"));
    if let Some(combined) = selector::attributes_selector(&snapshot.tag_name, combined) {
        selectors.push(combined);
    }

    selectors
}
