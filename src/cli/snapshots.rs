use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use selfheal_snapshot_store::{snapshot_key, ElementSnapshot, SnapshotStore};
use serde::Serialize;
use serde_json::json;

use crate::cli::context::CliContext;
use crate::cli::output::print_structured;

#[derive(Args, Clone, Debug)]
pub struct SnapshotsArgs {
    #[command(subcommand)]
    pub action: SnapshotsAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum SnapshotsAction {
    /// List stored snapshots
    List,

    /// Show the snapshot recorded for a selector
    Show {
        /// Selector the snapshot was captured for
        selector: String,
    },

    /// Delete the snapshot recorded for a selector
    Remove {
        /// Selector the snapshot was captured for
        selector: String,
    },

    /// Delete every stored snapshot
    Clear,

    /// Print the storage key derived from a selector
    Key {
        /// Selector to derive the key from
        selector: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRow<'a> {
    key: &'a str,
    #[serde(flatten)]
    snapshot: &'a ElementSnapshot,
}

pub async fn cmd_snapshots(args: SnapshotsArgs, ctx: &CliContext) -> Result<()> {
    let store = ctx.store();
    match args.action {
        SnapshotsAction::List => {
            let records = store.list().await?;
            let rows: Vec<SnapshotRow<'_>> = records
                .iter()
                .map(|(key, snapshot)| SnapshotRow { key, snapshot })
                .collect();
            if !print_structured(ctx.output(), &rows)? {
                if rows.is_empty() {
                    println!("No snapshots under {}", store.root().display());
                }
                for row in &rows {
                    println!(
                        "{:<32} {:<10} {}  {}",
                        row.key,
                        row.snapshot.tag_name,
                        row.snapshot.captured_at.to_rfc3339(),
                        row.snapshot.selector
                    );
                }
            }
        }
        SnapshotsAction::Show { selector } => {
            let key = snapshot_key(&selector);
            let Some(snapshot) = store.read(&key).await? else {
                bail!("No stored data found for selector: {}", selector);
            };
            if !print_structured(ctx.output(), &snapshot)? {
                println!("Snapshot {} ({})", key, store.path_for(&key).display());
                print!("{}", serde_yaml::to_string(&snapshot)?);
            }
        }
        SnapshotsAction::Remove { selector } => {
            let key = snapshot_key(&selector);
            let removed = store.remove(&key).await?;
            let payload = json!({ "key": key, "removed": removed });
            if !print_structured(ctx.output(), &payload)? {
                if removed {
                    println!("Removed snapshot {}", key);
                } else {
                    println!("No snapshot stored for {}", selector);
                }
            }
        }
        SnapshotsAction::Clear => {
            let removed = store.clear().await?;
            let payload = json!({ "removed": removed });
            if !print_structured(ctx.output(), &payload)? {
                println!(
                    "Removed {} snapshot(s) from {}",
                    removed,
                    store.root().display()
                );
            }
        }
        SnapshotsAction::Key { selector } => {
            let key = snapshot_key(&selector);
            let payload = json!({ "selector": selector, "key": key });
            if !print_structured(ctx.output(), &payload)? {
                println!("{}", key);
            }
        }
    }

    Ok(())
}
