//! Wayline CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wayline::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Enrich(args) => {
            wayline::cli::commands::enrich::execute(args, cli.config.as_deref(), cli.json).await
        }
        Commands::Watch(args) => {
            wayline::cli::commands::watch::execute(args, cli.config.as_deref(), cli.json).await
        }
    };

    if let Err(err) = result {
        wayline::cli::handle_error(err, cli.json);
    }
}
