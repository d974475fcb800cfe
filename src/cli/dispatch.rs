use super::config::cmd_config;
use super::env::CliArgs;
use super::snapshots::cmd_snapshots;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Config(args) => cmd_config(args, ctx).await,
        Commands::Snapshots(args) => cmd_snapshots(args, ctx).await,
    }
}
