use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod api;
mod config;
mod detection;
mod engine;
mod geometry;
mod message;
mod priority;
mod query;
mod ranker;

use crate::api::start_api_server;
use crate::config::NavGuideConfig;

#[derive(Parser)]
#[command(name = "navguide")]
#[command(about = "Navigation guidance engine for visually impaired users")]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Bind address, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(format!("navguide={}", log_level))
        .try_init(); // Use try_init to avoid panic if already initialized

    info!("Starting navguide - navigation guidance engine");

    // Load configuration
    let config = NavGuideConfig::load(&args.config).await?;
    info!(
        "Configuration loaded: {} priority classes, max {} detections per frame",
        config.priorities.len(),
        config.ranking.max_detections
    );

    let engine = config.build_engine();

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    match start_api_server(engine, &host, port).await {
        Ok(_) => info!("Server shut down cleanly"),
        Err(e) => {
            error!("Server error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
