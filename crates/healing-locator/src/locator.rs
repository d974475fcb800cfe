//! Public entry point: live match first, snapshot-driven healing second.

use std::sync::Arc;
use std::time::Duration;

use selfheal_snapshot_store::{snapshot_key, SnapshotStore};
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use crate::capture::SnapshotCapture;
use crate::chain::StrategyChain;
use crate::config::HealingConfig;
use crate::errors::LocatorError;
use crate::ports::{DiagnosticsPort, PagePort};
use crate::strategies::Strategy;
use crate::types::{ElementHandle, HealOutcome, LocateOptions, Resolution};

/// Self-healing locator.
///
/// A successful live match refreshes the stored snapshot for the selector;
/// this is the only path that writes to the store. A miss reads the snapshot
/// back and hands it to the [`StrategyChain`].
pub struct Locator {
    page: Arc<dyn PagePort>,
    store: Arc<dyn SnapshotStore>,
    config: Arc<HealingConfig>,
    capture: SnapshotCapture,
    chain: StrategyChain,
    diagnostics: Option<Arc<dyn DiagnosticsPort>>,
}

impl Locator {
    pub fn new(
        page: Arc<dyn PagePort>,
        store: Arc<dyn SnapshotStore>,
        config: Arc<HealingConfig>,
    ) -> Self {
        Self {
            capture: SnapshotCapture::new(page.clone()),
            chain: StrategyChain::new(page.clone(), &config),
            page,
            store,
            config,
            diagnostics: None,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsPort>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Replaces the built-in strategy of the same kind.
    pub fn with_strategy(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.chain.register(strategy);
        self
    }

    pub async fn locate(
        &self,
        selector: &str,
        options: LocateOptions,
    ) -> Result<Resolution, LocatorError> {
        match self.locate_inner(selector, options).await {
            Ok(resolution) => Ok(resolution),
            Err(err) => {
                self.report_failure(selector, &err).await;
                Err(err)
            }
        }
    }

    async fn locate_inner(
        &self,
        selector: &str,
        options: LocateOptions,
    ) -> Result<Resolution, LocatorError> {
        if selector.trim().is_empty() {
            return Err(LocatorError::InvalidSelector(selector.to_string()));
        }
        let key = snapshot_key(selector);
        let wait = options
            .timeout
            .unwrap_or_else(|| self.config.default_timeout());

        let found = self.query_live(selector, wait).await?;
        if let Some(first) = found.first() {
            let snapshot = self.capture.capture(first, selector).await?;
            self.store.write(&key, &snapshot).await?;
            debug!(selector, key = %key, "snapshot refreshed");
            return Ok(Resolution::live(selector, found));
        }

        info!(
            "Element not found with selector: {}. Attempting to heal...",
            selector
        );
        let snapshot = self
            .store
            .read(&key)
            .await?
            .ok_or_else(|| LocatorError::NoSnapshotAvailable {
                selector: selector.to_string(),
            })?;

        let outcome = self
            .chain
            .run(
                &snapshot,
                &self.config.healing_strategies,
                self.config.retry_attempts,
            )
            .await?;

        match outcome {
            HealOutcome::Healed {
                elements, strategy, ..
            } => Ok(Resolution::healed(selector, elements, strategy)),
            HealOutcome::Exhausted { tried } => Err(LocatorError::HealingExhausted {
                selector: selector.to_string(),
                tried,
            }),
        }
    }

    /// Polls the page until `selector` matches or `wait` elapses. Running out
    /// of time is a miss, not an error.
    async fn query_live(
        &self,
        selector: &str,
        wait: Duration,
    ) -> Result<Vec<ElementHandle>, LocatorError> {
        let deadline = deadline_after(wait);
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let found = match timeout(remaining, self.page.find(selector)).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(selector, ?wait, "live query timed out");
                    return Ok(Vec::new());
                }
            };
            if !found.is_empty() {
                return Ok(found);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(Vec::new());
            }
            sleep(self.config.poll_interval().min(remaining)).await;
        }
    }

    async fn report_failure(&self, selector: &str, err: &LocatorError) {
        if !self.config.screenshot_on_fail {
            return;
        }
        let Some(diagnostics) = &self.diagnostics else {
            return;
        };
        if let Err(capture_err) = diagnostics.capture_failure(selector, err).await {
            warn!(selector, %capture_err, "failure diagnostics could not be captured");
        }
    }
}

/// Caps the wait so an effectively unbounded timeout cannot overflow `Instant`.
const MAX_WAIT: Duration = Duration::from_secs(60 * 60 * 24 * 365);

fn deadline_after(wait: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(wait)
        .or_else(|| now.checked_add(MAX_WAIT))
        .unwrap_or(now)
}
