//! Ordered strategy execution with a bounded attempt budget

use std::collections::HashMap;
use std::sync::Arc;

use selfheal_snapshot_store::ElementSnapshot;
use tracing::{debug, info, warn};

use crate::config::HealingConfig;
use crate::errors::LocatorError;
use crate::ports::PagePort;
use crate::strategies::{AttributeStrategy, ProximityStrategy, Strategy, VisualStrategy};
use crate::types::{HealOutcome, HealingAttempt, StrategyKind};

/// Runs strategies one after another; the first one that matches wins, no
/// matter how a later strategy would have scored.
pub struct StrategyChain {
    strategies: HashMap<StrategyKind, Arc<dyn Strategy>>,
}

impl StrategyChain {
    /// Chain with the built-in strategies, configured from `config`.
    pub fn new(page: Arc<dyn PagePort>, config: &HealingConfig) -> Self {
        let mut chain = Self::empty();
        chain.register(Arc::new(AttributeStrategy::new(page.clone())));
        chain.register(Arc::new(ProximityStrategy::new(
            page,
            config.proximity_tolerance,
        )));
        chain.register(Arc::new(VisualStrategy::new(config.tolerance_level)));
        chain
    }

    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Installs `strategy` for its kind, replacing the current one.
    pub fn register(&mut self, strategy: Arc<dyn Strategy>) {
        self.strategies.insert(strategy.kind(), strategy);
    }

    fn get_strategy(&self, kind: StrategyKind) -> Option<Arc<dyn Strategy>> {
        self.strategies.get(&kind).cloned()
    }

    /// Tries `order` front to back, one budget unit per strategy.
    pub async fn run(
        &self,
        snapshot: &ElementSnapshot,
        order: &[StrategyKind],
        budget: usize,
    ) -> Result<HealOutcome, LocatorError> {
        let mut attempt = HealingAttempt::new(order, budget);

        while let Some(kind) = attempt.next_strategy() {
            info!(
                selector = %snapshot.selector,
                "Attempting healing strategy: {}",
                kind.name()
            );

            let Some(strategy) = self.get_strategy(kind) else {
                warn!("No strategy registered for {}", kind.name());
                continue;
            };

            match strategy.attempt(snapshot).await? {
                Some(elements) if !elements.is_empty() => {
                    info!(
                        "Successfully healed selector \"{}\" using {} strategy",
                        snapshot.selector,
                        kind.name()
                    );
                    return Ok(HealOutcome::Healed {
                        elements,
                        strategy: kind,
                        tried: attempt.into_tried(),
                    });
                }
                _ => debug!("Strategy {} found no candidates", kind.name()),
            }
        }

        warn!(
            "All healing attempts failed for selector: {} ({} tried)",
            snapshot.selector,
            attempt.attempts()
        );
        Ok(HealOutcome::Exhausted {
            tried: attempt.into_tried(),
        })
    }
}
