//! Greeting and health-check service entry point.

use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pipeline_demo::api::AppState;
use pipeline_demo::config::{Config, LogFormat};
use pipeline_demo::metrics;
use pipeline_demo::server::Server;
use pipeline_demo::utils::shutdown_signal;

/// Greeting and health-check HTTP service.
///
/// Configured through the environment: PORT, NODE_ENV, HOST, LOG_FORMAT, METRICS_PORT.
#[derive(Parser, Debug)]
#[command(name = "pipeline-demo")]
#[command(about = "Minimal greeting and health-check HTTP service")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started_at = Instant::now();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_tracing(args.verbose, config.log_format());

    metrics::init_metrics(config.metrics_addr()).map_err(|e| {
        error!("Failed to initialize metrics: {}", e);
        e
    })?;

    let state = AppState::with_start(&config, started_at);
    let server = Server::new(config, state);

    let bound = server.bind().await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    bound.run(shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("pipeline_demo=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}
