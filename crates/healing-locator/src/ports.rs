use async_trait::async_trait;

use crate::errors::{LocatorError, PageError};
use crate::types::{ElementHandle, ElementState};

/// Boundary to the browser-automation engine that owns the live page.
#[async_trait]
pub trait PagePort: Send + Sync {
    /// Runs `selector` against the whole document, returning matches in
    /// document order. No match is an empty vec, not an error. The selector
    /// is passed through verbatim, including `:contains("…")` text filters.
    async fn find(&self, selector: &str) -> Result<Vec<ElementHandle>, PageError>;

    /// Reads tag, text, attributes and geometry of a matched element.
    async fn describe(&self, element: &ElementHandle) -> Result<ElementState, PageError>;
}

/// Collaborator that records diagnostics (typically a screenshot) when a
/// locate call fails for good.
#[async_trait]
pub trait DiagnosticsPort: Send + Sync {
    async fn capture_failure(&self, selector: &str, error: &LocatorError)
        -> Result<(), PageError>;
}
