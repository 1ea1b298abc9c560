use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use floodwatch::{
    endpoint_for, ConsoleNotifier, Monitor, MonitorConfig, StatusFetcher, StatusSource,
    DEFAULT_DEVICE_ADDR,
};

#[derive(Parser, Debug)]
#[command(name = "floodwatch")]
#[command(about = "Polling monitor and alert notifier for networked water leak sensors")]
struct Args {
    /// Device address to poll (IP or host[:port])
    device: Option<String>,

    /// Polling interval in seconds
    #[arg(short, long, default_value = "5")]
    interval: u64,

    /// Request timeout in milliseconds
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    /// Consecutive failures before the connection is reported unhealthy
    #[arg(long, default_value = "5")]
    max_failures: u32,

    /// Readings between automatic log flushes
    #[arg(long, default_value = "10")]
    batch_size: usize,

    /// Path of the reading log file
    #[arg(short, long, default_value = "sensor_log.json")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let device = args.device.as_deref().unwrap_or(DEFAULT_DEVICE_ADDR);
    let config = MonitorConfig {
        endpoint: endpoint_for(device),
        poll_interval: Duration::from_secs(args.interval),
        request_timeout: Duration::from_millis(args.timeout_ms),
        max_failures: args.max_failures,
        batch_size: args.batch_size,
        log_path: args.log_file,
    };

    let fetcher = StatusFetcher::new(config.endpoint.clone(), config.request_timeout)
        .map_err(|e| anyhow::anyhow!("startup failed: {}", e))?;

    info!("floodwatch - water sensor monitor");
    info!("device: {}", fetcher.description());
    info!("polling interval: {}s", args.interval);
    info!("log file: {}", config.log_path.display());
    info!("press Ctrl+C to stop");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        } else {
            warn!("failed to install Ctrl+C handler; shutdown signal unavailable");
        }
    });

    let mut monitor = Monitor::new(config, Box::new(fetcher), Box::new(ConsoleNotifier));
    monitor.run(shutdown_rx).await;

    info!("monitoring stopped");
    Ok(())
}
