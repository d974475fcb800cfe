//! Healing configuration, constructed once per run and shared by reference.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::StrategyKind;

pub const DEFAULT_TIMEOUT_MS: u64 = 4000;
pub const DEFAULT_PROXIMITY_TOLERANCE: f64 = 50.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read healing config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse healing config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse healing config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid healing config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealingConfig {
    /// Upper bound on strategies attempted per healing pass
    pub retry_attempts: usize,
    /// Strategies to run, in priority order
    pub healing_strategies: Vec<StrategyKind>,
    /// Capture diagnostics on unrecoverable failure
    pub screenshot_on_fail: bool,
    /// Root of the snapshot store
    pub storage_location: PathBuf,
    /// Similarity threshold (0-1) reserved for visual comparison
    pub tolerance_level: f64,
    pub default_timeout_ms: u64,
    /// Per-dimension distance allowed by the nearby strategy
    pub proximity_tolerance: f64,
    pub poll_interval_ms: u64,
}

impl Default for HealingConfig {
    fn default() -> Self {
        Self {
            retry_attempts: 3,
            healing_strategies: StrategyKind::default_chain(),
            screenshot_on_fail: true,
            storage_location: PathBuf::from("healing-data"),
            tolerance_level: 0.8,
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            proximity_tolerance: DEFAULT_PROXIMITY_TOLERANCE,
            poll_interval_ms: 100,
        }
    }
}

impl HealingConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Strategies a single healing pass may run.
    pub fn attempt_budget(&self) -> usize {
        self.retry_attempts.min(self.healing_strategies.len())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.tolerance_level) {
            return Err(ConfigError::Invalid(format!(
                "toleranceLevel must be within 0..=1, got {}",
                self.tolerance_level
            )));
        }
        if self.proximity_tolerance.is_nan() || self.proximity_tolerance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "proximityTolerance must be positive, got {}",
                self.proximity_tolerance
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "pollIntervalMs must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses YAML, or JSON when `hint` has a `.json` extension. The result
    /// is validated.
    pub fn parse(raw: &str, hint: Option<&Path>) -> Result<Self, ConfigError> {
        let is_json = hint
            .and_then(|path| path.extension())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let config: HealingConfig = if is_json {
            serde_json::from_str(raw)?
        } else {
            serde_yaml::from_str(raw)?
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&raw, Some(path))
    }
}
