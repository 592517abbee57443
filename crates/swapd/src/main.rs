//! swapd - venue-priced swap engine, simulation entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Venue-priced swap engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SWAPD_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    swap_telemetry::init_logging()?;

    info!("Starting swapd v{}", env!("CARGO_PKG_VERSION"));

    let config = swapd::AppConfig::load(args.config.as_deref())?;
    info!(mode = ?config.venue.mode, pairs = config.trading_pairs().len(), "Configuration loaded");

    let app = swapd::Application::new(config)?;
    app.run().await?;

    Ok(())
}
