//! Command-line interface for Wayline.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

/// Trip-request route enrichment service.
#[derive(Parser)]
#[command(name = "wayline", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a configuration file (default: wayline.yaml + WAYLINE_* env)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run one enrichment cycle over a JSON trip list
    Enrich(commands::enrich::EnrichArgs),
    /// Watch a JSON trip list and re-run enrichment whenever it changes
    Watch(commands::watch::WatchArgs),
}

/// Print a command error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": format!("{err:#}") }));
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
