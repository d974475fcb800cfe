use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use healing_locator::HealingConfig;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const LOCAL_CONFIG_PATH: &str = "config/healing.yaml";

/// Logs go to stderr so structured output on stdout stays parseable.
pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub struct LoadedConfig {
    pub config: HealingConfig,
    pub path: PathBuf,
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let (config_path, explicit) = match config_path {
        Some(path) => (path.clone(), true),
        None => (default_config_path(), false),
    };

    if config_path.exists() {
        let config = HealingConfig::load(&config_path)
            .await
            .with_context(|| format!("Failed to load config file {}", config_path.display()))?;
        info!("Loaded configuration from: {}", config_path.display());
        Ok(LoadedConfig {
            config,
            path: config_path,
        })
    } else if explicit {
        bail!("Config file not found: {}", config_path.display());
    } else {
        debug!(
            "Config file not found, using defaults: {}",
            config_path.display()
        );
        Ok(LoadedConfig {
            config: HealingConfig::default(),
            path: config_path,
        })
    }
}

/// Priority: ./config/healing.yaml > <config dir>/selfheal/healing.yaml
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from(LOCAL_CONFIG_PATH);
    if local_config.exists() {
        return local_config;
    }
    match dirs::config_dir() {
        Some(mut path) => {
            path.push("selfheal");
            path.push("healing.yaml");
            path
        }
        None => local_config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(load_config(Some(&path)).await.is_err());
    }

    #[tokio::test]
    async fn explicit_config_is_parsed_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("healing.yaml");
        std::fs::write(&path, "retryAttempts: 1\nhealingStrategies: [nearby]\n").unwrap();

        let loaded = load_config(Some(&path)).await.unwrap();
        assert_eq!(loaded.config.retry_attempts, 1);
        assert_eq!(loaded.path, path);

        std::fs::write(&path, "retryAttempts: 1\nhealingStrategies: [fuzzy]\n").unwrap();
        assert!(load_config(Some(&path)).await.is_err());
    }
}
