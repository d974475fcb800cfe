//! Core types for the locator

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use selfheal_snapshot_store::BoundingBox;
use serde::{Deserialize, Serialize};

/// Opaque reference to a live element, issued by the page engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub String);

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Observed state of a live element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementState {
    /// Element tag name, any case
    pub tag_name: String,

    /// Visible text content
    pub text: String,

    /// Every attribute present on the element
    pub attributes: BTreeMap<String, String>,

    /// Viewport-relative geometry
    pub bounding_box: BoundingBox,
}

impl ElementState {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Healing strategy enumeration
///
/// Configuration order is priority order; see [`StrategyKind::default_chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Selectors synthesized from recorded attributes and text
    Attribute,

    /// Same-tag elements near the recorded geometry
    #[serde(alias = "proximity")]
    Nearby,

    /// Image similarity (extension point)
    Visual,
}

impl StrategyKind {
    /// Get strategy name as string
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Attribute => "attribute",
            StrategyKind::Nearby => "nearby",
            StrategyKind::Visual => "visual",
        }
    }

    pub fn default_chain() -> Vec<StrategyKind> {
        vec![
            StrategyKind::Attribute,
            StrategyKind::Nearby,
            StrategyKind::Visual,
        ]
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attribute" => Ok(StrategyKind::Attribute),
            "nearby" | "proximity" => Ok(StrategyKind::Nearby),
            "visual" => Ok(StrategyKind::Visual),
            other => Err(format!("unknown healing strategy '{other}'")),
        }
    }
}

/// Per-call overrides for [`crate::Locator::locate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocateOptions {
    /// Live query timeout; the configured default applies when unset
    pub timeout: Option<Duration>,
}

impl LocateOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Successful locate result
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Selector the caller asked for
    pub selector: String,

    /// Matched elements, in document order
    pub elements: Vec<ElementHandle>,

    /// Strategy that healed the selector, `None` for a live match
    pub strategy: Option<StrategyKind>,
}

impl Resolution {
    pub fn live(selector: impl Into<String>, elements: Vec<ElementHandle>) -> Self {
        Self {
            selector: selector.into(),
            elements,
            strategy: None,
        }
    }

    pub fn healed(
        selector: impl Into<String>,
        elements: Vec<ElementHandle>,
        strategy: StrategyKind,
    ) -> Self {
        Self {
            selector: selector.into(),
            elements,
            strategy: Some(strategy),
        }
    }

    pub fn from_heal(&self) -> bool {
        self.strategy.is_some()
    }

    pub fn first(&self) -> Option<&ElementHandle> {
        self.elements.first()
    }
}

/// Heal outcome enumeration
#[derive(Debug, Clone)]
pub enum HealOutcome {
    /// A strategy produced at least one element
    Healed {
        elements: Vec<ElementHandle>,
        strategy: StrategyKind,
        tried: Vec<StrategyKind>,
    },

    /// Budget or strategy list ran out without a match
    Exhausted { tried: Vec<StrategyKind> },
}

impl HealOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, HealOutcome::Healed { .. })
    }

    pub fn tried(&self) -> &[StrategyKind] {
        match self {
            HealOutcome::Healed { tried, .. } | HealOutcome::Exhausted { tried } => tried,
        }
    }
}

/// Bookkeeping for one healing pass: what is left, what ran, and how much of
/// the attempt budget is spent.
#[derive(Debug, Clone)]
pub struct HealingAttempt {
    remaining: VecDeque<StrategyKind>,
    tried: Vec<StrategyKind>,
    budget: usize,
}

impl HealingAttempt {
    pub fn new(strategies: &[StrategyKind], budget: usize) -> Self {
        Self {
            remaining: strategies.iter().copied().collect(),
            tried: Vec::new(),
            budget,
        }
    }

    /// Consumes one budget unit and yields the next strategy, or `None` once
    /// the budget or the list is exhausted.
    pub fn next_strategy(&mut self) -> Option<StrategyKind> {
        if self.is_exhausted() {
            return None;
        }
        let next = self.remaining.pop_front()?;
        self.tried.push(next);
        Some(next)
    }

    pub fn is_exhausted(&self) -> bool {
        self.tried.len() >= self.budget || self.remaining.is_empty()
    }

    pub fn attempts(&self) -> usize {
        self.tried.len()
    }

    pub fn tried(&self) -> &[StrategyKind] {
        &self.tried
    }

    pub fn into_tried(self) -> Vec<StrategyKind> {
        self.tried
    }
}
