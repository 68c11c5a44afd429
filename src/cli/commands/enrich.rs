//! `wayline enrich`: one batch enrichment cycle over a JSON trip list.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::adapters::routing::HttpRouteComputer;
use crate::adapters::source::JsonFileSource;
use crate::cli::output::{cycle_summary, trip_table};
use crate::domain::ports::TripSource;
use crate::services::TripListSynchronizer;

/// Arguments for the `enrich` subcommand.
#[derive(Args)]
pub struct EnrichArgs {
    /// JSON file containing an array of trip requests
    pub input: PathBuf,

    /// Write the enriched list to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute the `enrich` subcommand.
pub async fn execute(args: EnrichArgs, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = super::load_config(config_path)?;
    let computer = Arc::new(
        HttpRouteComputer::new(&config.routing).context("Failed to build route client")?,
    );

    let trips = JsonFileSource::new(&args.input)
        .load()
        .await
        .context("Failed to load trip list")?;

    let synchronizer = TripListSynchronizer::new(computer, config.enrichment);
    let (held, stats) = synchronizer.enrich_once(trips).await;

    if let Some(path) = &args.output {
        let body = serde_json::to_string_pretty(held.as_slice())?;
        tokio::fs::write(path, body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "trips": held.as_slice(),
                "stats": {
                    "scanned": stats.scanned,
                    "dispatched": stats.dispatched,
                    "succeeded": stats.succeeded,
                },
            })
        );
    } else {
        println!("{}", trip_table(&held));
        println!("\n{}", cycle_summary(&stats));
    }

    Ok(())
}
