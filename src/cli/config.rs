use crate::cli::context::CliContext;
use crate::cli::output::print_structured;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use healing_locator::HealingConfig;
use serde::Serialize;
use tokio::fs;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Validate the configuration file
    Validate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    path: String,
    exists: bool,
    valid: bool,
    attempt_budget: usize,
}

pub async fn cmd_config(args: ConfigArgs, ctx: &CliContext) -> Result<()> {
    let path = ctx.config_path();
    match args.action {
        ConfigAction::Show => {
            if !print_structured(ctx.output(), ctx.config())? {
                println!("Current configuration ({}):", path.display());
                print!("{}", serde_yaml::to_string(ctx.config())?);
            }
        }
        ConfigAction::Validate => {
            let exists = fs::try_exists(path).await?;
            let config = if exists {
                let raw = fs::read_to_string(path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                HealingConfig::parse(&raw, Some(path))
                    .with_context(|| format!("parsing {}", path.display()))?
            } else {
                HealingConfig::default()
            };

            let report = ValidationReport {
                path: path.display().to_string(),
                exists,
                valid: true,
                attempt_budget: config.attempt_budget(),
            };
            if !print_structured(ctx.output(), &report)? {
                if exists {
                    println!("Configuration file {} is valid", path.display());
                } else {
                    println!(
                        "No configuration file at {}; defaults are valid",
                        path.display()
                    );
                }
                println!(
                    "Strategies per healing pass: {} ({})",
                    config.attempt_budget(),
                    strategy_names(&config)
                );
            }
        }
    }

    Ok(())
}

fn strategy_names(config: &HealingConfig) -> String {
    config
        .healing_strategies
        .iter()
        .take(config.attempt_budget())
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(" -> ")
}
