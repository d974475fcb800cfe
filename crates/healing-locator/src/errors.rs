//! Error types for the locator

use selfheal_snapshot_store::StoreError;
use thiserror::Error;

use crate::types::StrategyKind;

/// Failure reported by the page query engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PageError {
    /// The engine rejected or failed to run a selector
    #[error("query '{selector}' failed: {reason}")]
    Query { selector: String, reason: String },

    /// A previously returned handle no longer refers to a live element
    #[error("element detached: {0}")]
    Detached(String),

    /// Transport or engine failure
    #[error("page engine error: {0}")]
    Engine(String),
}

/// Locator error enumeration
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Live match failed and nothing was ever captured for the selector
    #[error("No stored data found for selector: {selector}")]
    NoSnapshotAvailable { selector: String },

    /// A snapshot existed but no attempted strategy found a candidate
    #[error("Failed to heal selector: {selector} (tried: {})", strategy_list(.tried))]
    HealingExhausted {
        selector: String,
        tried: Vec<StrategyKind>,
    },

    /// Empty or otherwise unusable selector
    #[error("Invalid selector: {0:?}")]
    InvalidSelector(String),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LocatorError {
    /// Both terminal healing outcomes, as opposed to collaborator failures.
    pub fn is_healing_failure(&self) -> bool {
        matches!(
            self,
            LocatorError::NoSnapshotAvailable { .. } | LocatorError::HealingExhausted { .. }
        )
    }

    pub fn selector(&self) -> Option<&str> {
        match self {
            LocatorError::NoSnapshotAvailable { selector }
            | LocatorError::HealingExhausted { selector, .. } => Some(selector),
            LocatorError::InvalidSelector(selector) => Some(selector),
            _ => None,
        }
    }
}

fn strategy_list(tried: &[StrategyKind]) -> String {
    if tried.is_empty() {
        return "none".to_string();
    }
    tried
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(", ")
}
