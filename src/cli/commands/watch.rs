//! `wayline watch`: poll a JSON trip list and re-adopt it on change.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::adapters::routing::HttpRouteComputer;
use crate::adapters::source::JsonFileSource;
use crate::cli::output::trip_table;
use crate::domain::models::TripRequest;
use crate::domain::ports::TripSource;
use crate::services::TripListSynchronizer;

/// Arguments for the `watch` subcommand.
#[derive(Args)]
pub struct WatchArgs {
    /// JSON file containing an array of trip requests
    pub input: PathBuf,

    /// Poll interval in seconds
    #[arg(long, default_value_t = 2)]
    pub interval_secs: u64,
}

/// Execute the `watch` subcommand. Runs until Ctrl-C.
pub async fn execute(args: WatchArgs, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = super::load_config(config_path)?;
    let computer = Arc::new(
        HttpRouteComputer::new(&config.routing).context("Failed to build route client")?,
    );
    let source = JsonFileSource::new(&args.input);
    let synchronizer = TripListSynchronizer::new(computer, config.enrichment);

    // Print every published list: the freshly adopted one and each
    // merge that attached a geometry.
    let mut rx = synchronizer.subscribe();
    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let held = Arc::clone(&*rx.borrow_and_update());
            if json {
                println!("{}", serde_json::json!({ "trips": held.as_slice() }));
            } else {
                println!("{}\n", trip_table(&held));
            }
        }
    });

    let mut interval = tokio::time::interval(Duration::from_secs(args.interval_secs.max(1)));
    let mut last_input: Option<Vec<TripRequest>> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = interval.tick() => {
                match source.load().await {
                    // Adopt once per actual change, not once per poll.
                    Ok(trips) => {
                        if last_input.as_ref() != Some(&trips) {
                            last_input = Some(trips.clone());
                            synchronizer.adopt(trips);
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "trip source read failed, keeping last list");
                    }
                }
            }
        }
    }

    printer.abort();
    Ok(())
}
